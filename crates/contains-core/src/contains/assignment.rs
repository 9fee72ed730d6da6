//! Maximum-weight assignment of rows to distinct columns (Kuhn-Munkres).

const INF: i64 = i64::MAX / 4;

/// Assigns every row of `weights` to a distinct column, maximizing the total.
///
/// Requires `rows <= columns`. Returns the chosen column for each row.
pub(super) fn max_weight_assignment(weights: &[Vec<u64>]) -> Vec<usize> {
    let rows = weights.len();
    let columns = weights.first().map_or(0, Vec::len);
    debug_assert!(rows <= columns, "assignment needs at least as many columns as rows");
    if rows == 0 {
        return Vec::new();
    }

    let ceiling = weights.iter().flatten().copied().max().unwrap_or(0);
    let cost = |row: usize, column: usize| -> i64 {
        i64::try_from(ceiling - weights[row][column]).unwrap_or(INF)
    };

    // Potentials and matching are 1-based; index 0 is the virtual start column.
    let mut row_potential = vec![0i64; rows + 1];
    let mut column_potential = vec![0i64; columns + 1];
    let mut owner = vec![0usize; columns + 1];
    let mut way = vec![0usize; columns + 1];

    for row in 1..=rows {
        owner[0] = row;
        let mut current = 0usize;
        let mut min_slack = vec![INF; columns + 1];
        let mut used = vec![false; columns + 1];
        loop {
            used[current] = true;
            let active_row = owner[current];
            let mut delta = INF;
            let mut next = 0usize;
            for column in 1..=columns {
                if used[column] {
                    continue;
                }
                let slack = cost(active_row - 1, column - 1)
                    - row_potential[active_row]
                    - column_potential[column];
                if slack < min_slack[column] {
                    min_slack[column] = slack;
                    way[column] = current;
                }
                if min_slack[column] < delta {
                    delta = min_slack[column];
                    next = column;
                }
            }
            for column in 0..=columns {
                if used[column] {
                    row_potential[owner[column]] += delta;
                    column_potential[column] -= delta;
                } else {
                    min_slack[column] -= delta;
                }
            }
            current = next;
            if owner[current] == 0 {
                break;
            }
        }
        loop {
            let previous = way[current];
            owner[current] = owner[previous];
            current = previous;
            if current == 0 {
                break;
            }
        }
    }

    let mut assignment = vec![0usize; rows];
    for column in 1..=columns {
        if owner[column] != 0 {
            assignment[owner[column] - 1] = column - 1;
        }
    }
    assignment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(weights: &[Vec<u64>], assignment: &[usize]) -> u64 {
        assignment.iter().enumerate().map(|(row, &column)| weights[row][column]).sum()
    }

    #[test]
    fn picks_the_swapped_diagonal() {
        let weights = vec![vec![0, 10], vec![10, 0]];
        assert_eq!(max_weight_assignment(&weights), [1, 0]);
    }

    #[test]
    fn rectangular_matrix_leaves_columns_unused() {
        let weights = vec![vec![1, 2, 9], vec![8, 1, 1]];
        let assignment = max_weight_assignment(&weights);
        assert_eq!(assignment, [2, 0]);
        assert_eq!(total(&weights, &assignment), 17);
    }

    #[test]
    fn columns_are_distinct() {
        let weights = vec![vec![5, 5, 5], vec![5, 5, 5], vec![5, 5, 5]];
        let mut assignment = max_weight_assignment(&weights);
        assignment.sort_unstable();
        assert_eq!(assignment, [0, 1, 2]);
    }

    #[test]
    fn empty_input_yields_empty_assignment() {
        assert!(max_weight_assignment(&[]).is_empty());
    }
}

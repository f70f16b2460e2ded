//! Sort cycling and client-side row ordering.

use std::cmp::Ordering;
use tabula_core::{CellValue, ConfigurationError, OrderedColumns, SortEntry, SortState, TableRow};

/// Next sort state after activating `column_id`'s header.
///
/// The same column cycles `unsorted → ascending → descending → unsorted`;
/// any other column starts at ascending.
#[must_use]
pub fn next_sort(current: &SortState, column_id: &str) -> SortState {
    match current.primary() {
        Some(entry) if entry.column_id == column_id => {
            if entry.descending {
                SortState::unsorted()
            } else {
                SortState::single(SortEntry::descending(column_id))
            }
        }
        _ => SortState::single(SortEntry::ascending(column_id)),
    }
}

/// Check that every entry names an existing, sortable column.
pub fn validate_sort(sort: &SortState, columns: &OrderedColumns) -> Result<(), ConfigurationError> {
    for entry in sort.entries() {
        let column = columns.require(&entry.column_id, "sort state")?;
        if !column.sortable {
            return Err(ConfigurationError::NotSortable {
                id: entry.column_id.clone(),
            });
        }
    }
    Ok(())
}

/// Row indices in sorted order.
///
/// The sort is stable: rows with equal keys keep their input order, in
/// both directions. Empty cells sort after values when ascending.
#[must_use]
pub fn sorted_indices<R: TableRow>(rows: &[R], sort: &SortState) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..rows.len()).collect();
    let entries = sort.entries();
    if entries.is_empty() {
        return indices;
    }

    let keys: Vec<Vec<CellValue>> = rows
        .iter()
        .map(|row| entries.iter().map(|e| row.cell_value(&e.column_id)).collect())
        .collect();

    indices.sort_by(|&a, &b| {
        for (i, entry) in entries.iter().enumerate() {
            let ord = keys[a][i].sort_cmp(&keys[b][i]);
            let ord = if entry.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
    indices
}

/// Rows in sorted order.
#[must_use]
pub fn sort_rows<'a, R: TableRow>(rows: &'a [R], sort: &SortState) -> Vec<&'a R> {
    sorted_indices(rows, sort)
        .into_iter()
        .map(|i| &rows[i])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tabula_core::{normalize, ColumnDescriptor, Record, SortDirection};

    fn ids(rows: &[&Record]) -> Vec<String> {
        rows.iter().map(|r| r.id.clone()).collect()
    }

    // ===== Cycle Tests =====

    #[test]
    fn test_cycle_same_column() {
        let s0 = SortState::unsorted();
        let s1 = next_sort(&s0, "name");
        assert_eq!(s1.direction_of("name"), Some(SortDirection::Ascending));
        let s2 = next_sort(&s1, "name");
        assert_eq!(s2.direction_of("name"), Some(SortDirection::Descending));
        let s3 = next_sort(&s2, "name");
        assert!(s3.is_unsorted());
        let s4 = next_sort(&s3, "name");
        assert_eq!(s4, s1);
    }

    #[test]
    fn test_other_column_resets_to_ascending() {
        let desc = SortState::single(SortEntry::descending("name"));
        let next = next_sort(&desc, "age");
        assert_eq!(next, SortState::single(SortEntry::ascending("age")));

        let asc = SortState::single(SortEntry::ascending("name"));
        assert_eq!(next_sort(&asc, "age").direction_of("age"), Some(SortDirection::Ascending));
    }

    // ===== Validation Tests =====

    #[test]
    fn test_validate_sort() {
        let columns = normalize([
            ColumnDescriptor::new("name", "Name").sortable(),
            ColumnDescriptor::new("notes", "Notes"),
        ])
        .unwrap();

        assert!(validate_sort(&SortState::single(SortEntry::ascending("name")), &columns).is_ok());
        assert!(matches!(
            validate_sort(&SortState::single(SortEntry::ascending("notes")), &columns),
            Err(ConfigurationError::NotSortable { .. })
        ));
        assert!(matches!(
            validate_sort(&SortState::single(SortEntry::ascending("ghost")), &columns),
            Err(ConfigurationError::UnknownColumn { .. })
        ));
    }

    // ===== Ordering Tests =====

    #[test]
    fn test_sort_numbers() {
        let rows = vec![
            Record::new("a").cell("n", 10),
            Record::new("b").cell("n", 2),
            Record::new("c").cell("n", 33),
        ];
        let asc = sort_rows(&rows, &SortState::single(SortEntry::ascending("n")));
        assert_eq!(ids(&asc), vec!["b", "a", "c"]);
        let desc = sort_rows(&rows, &SortState::single(SortEntry::descending("n")));
        assert_eq!(ids(&desc), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_unsorted_keeps_order() {
        let rows = vec![Record::new("x"), Record::new("y")];
        assert_eq!(sorted_indices(&rows, &SortState::unsorted()), vec![0, 1]);
    }

    #[test]
    fn test_empty_cells_sort_last_ascending() {
        let rows = vec![
            Record::new("a"),
            Record::new("b").cell("n", 1),
        ];
        let asc = sort_rows(&rows, &SortState::single(SortEntry::ascending("n")));
        assert_eq!(ids(&asc), vec!["b", "a"]);
    }

    #[test]
    fn test_stable_ties_descending() {
        let rows = vec![
            Record::new("1").cell("k", "x"),
            Record::new("2").cell("k", "y"),
            Record::new("3").cell("k", "x"),
            Record::new("4").cell("k", "y"),
        ];
        let desc = sort_rows(&rows, &SortState::single(SortEntry::descending("k")));
        assert_eq!(ids(&desc), vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_secondary_key() {
        let rows = vec![
            Record::new("1").cell("g", "b").cell("n", 2),
            Record::new("2").cell("g", "a").cell("n", 9),
            Record::new("3").cell("g", "b").cell("n", 1),
        ];
        let sort = SortState::from_entries([SortEntry::ascending("g"), SortEntry::ascending("n")]);
        assert_eq!(ids(&sort_rows(&rows, &sort)), vec!["2", "3", "1"]);
    }

    proptest! {
        #[test]
        fn prop_sort_is_stable(
            keys in prop::collection::vec(0i32..4, 0..40),
            descending in any::<bool>(),
        ) {
            let rows: Vec<Record> = keys
                .iter()
                .enumerate()
                .map(|(i, k)| Record::new(i.to_string()).cell("k", *k))
                .collect();
            let sort = SortState::single(SortEntry { column_id: "k".to_string(), descending });
            let order = sorted_indices(&rows, &sort);

            prop_assert_eq!(order.len(), rows.len());
            for pair in order.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if keys[a] == keys[b] {
                    prop_assert!(a < b, "equal keys must keep input order");
                } else if descending {
                    prop_assert!(keys[a] > keys[b]);
                } else {
                    prop_assert!(keys[a] < keys[b]);
                }
            }
        }
    }
}

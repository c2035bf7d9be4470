/// A column found by a substring of its header cell, with a fallback index
/// used when no header cell contains the substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnPattern {
    pub name: &'static str,
    pub needle: &'static str,
    pub default: usize,
}

/// Which header cell wins when several contain the same substring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPolicy {
    First,
    Last,
}

/// Resolves one column index per pattern.
///
/// Each header cell is assigned to the first pattern (in pattern order) whose
/// substring it contains, so a single cell never resolves two columns.
/// Patterns without a matching cell keep their default index.
pub fn resolve_columns<const N: usize>(
    header: &[String],
    patterns: &[ColumnPattern; N],
    policy: MatchPolicy,
) -> [usize; N] {
    let found = header
        .iter()
        .enumerate()
        .filter_map(|(index, cell)| {
            patterns
                .iter()
                .position(|pattern| cell.contains(pattern.needle))
                .map(|slot| (slot, index))
        })
        .fold([None; N], |mut found, (slot, index)| {
            if policy == MatchPolicy::Last || found[slot].is_none() {
                found[slot] = Some(index);
            }
            found
        });

    std::array::from_fn(|slot| {
        let pattern = &patterns[slot];
        match found[slot] {
            Some(index) => {
                log::info!(
                    "Found {} column: {:?} at index {}",
                    pattern.name,
                    header[index],
                    index
                );
                index
            }
            None => {
                log::info!(
                    "No {} column in header, using default index {}",
                    pattern.name,
                    pattern.default
                );
                pattern.default
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATTERNS: [ColumnPattern; 3] = [
        ColumnPattern {
            name: "time",
            needle: "交易时间",
            default: 0,
        },
        ColumnPattern {
            name: "amount",
            needle: "金额",
            default: 5,
        },
        ColumnPattern {
            name: "status",
            needle: "状态",
            default: 7,
        },
    ];

    fn header(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|cell| cell.to_string()).collect()
    }

    #[test]
    fn uses_defaults_without_matches() {
        let header = header(&["a", "b", "c"]);
        assert_eq!(
            [0, 5, 7],
            resolve_columns(&header, &PATTERNS, MatchPolicy::First)
        );
        assert_eq!(
            [0, 5, 7],
            resolve_columns(&header, &PATTERNS, MatchPolicy::Last)
        );
    }

    #[test]
    fn empty_header_uses_defaults() {
        assert_eq!([0, 5, 7], resolve_columns(&[], &PATTERNS, MatchPolicy::Last));
    }

    #[test]
    fn substring_match_overrides_default() {
        let header = header(&["交易时间", "交易类型", "金额(元)", "当前状态"]);
        assert_eq!(
            [0, 2, 3],
            resolve_columns(&header, &PATTERNS, MatchPolicy::First)
        );
    }

    #[test]
    fn partial_match_keeps_other_defaults() {
        let header = header(&["x", "x", "x", "x", "x", "x", "金额"]);
        assert_eq!(
            [0, 6, 7],
            resolve_columns(&header, &PATTERNS, MatchPolicy::First)
        );
    }

    #[test]
    fn first_policy_keeps_first_match() {
        let header = header(&["金额", "交易状态", "原金额", "退款状态"]);
        assert_eq!(
            [0, 0, 1],
            resolve_columns(&header, &PATTERNS, MatchPolicy::First)
        );
    }

    #[test]
    fn last_policy_keeps_last_match() {
        let header = header(&["金额", "交易状态", "原金额", "退款状态"]);
        assert_eq!(
            [0, 2, 3],
            resolve_columns(&header, &PATTERNS, MatchPolicy::Last)
        );
    }

    #[test]
    fn cell_matches_only_first_pattern() {
        // Contains both "交易时间" and "状态", only the time column takes it.
        let header = header(&["x", "交易时间状态"]);
        assert_eq!(
            [1, 5, 7],
            resolve_columns(&header, &PATTERNS, MatchPolicy::Last)
        );
    }
}

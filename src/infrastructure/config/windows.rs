//! Built-in target windows.

use chrono::NaiveDate;

use crate::domain::SearchWindow;

const ORIGIN: &str = "AGP";
const DESTINATION: &str = "UIO";

/// Date pairs monitored when the config lists no `[[windows]]`.
const DEFAULT_DATES: [((u32, u32), (u32, u32)); 7] = [
    ((7, 1), (7, 20)),
    ((7, 1), (7, 21)),
    ((7, 1), (7, 19)),
    ((7, 1), (7, 18)),
    ((6, 30), (7, 19)),
    ((6, 30), (7, 20)),
    ((6, 30), (7, 18)),
];

/// Malaga to Quito round trips around July 2026.
#[must_use]
pub fn default_windows() -> Vec<SearchWindow> {
    DEFAULT_DATES
        .iter()
        .filter_map(|&((dm, dd), (rm, rd))| {
            let departure = NaiveDate::from_ymd_opt(2026, dm, dd)?;
            let return_date = NaiveDate::from_ymd_opt(2026, rm, rd)?;
            SearchWindow::try_new(ORIGIN, DESTINATION, departure, return_date).ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seven_distinct_windows() {
        let windows = default_windows();
        assert_eq!(windows.len(), 7);

        let mut keys: Vec<_> = windows.iter().map(SearchWindow::key).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), 7);
        assert_eq!(windows[0].key().as_str(), "2026-07-01:2026-07-20");
    }
}

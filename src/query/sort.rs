//! Stable sorting by a named field.

use crate::data::{Document, FieldValue};
use crate::utils::date::Timestamp;
use deunicode::deunicode;
use serde::Serialize;
use std::cmp::Ordering;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// The other direction. Re-selecting the current sort field flips
    /// descending to ascending and back.
    pub fn toggle(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Field name plus direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sort {
    pub field: String,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
        Self {
            field: field.into(),
            order,
        }
    }

    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Asc)
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortOrder::Desc)
    }

    /// Newest first.
    pub fn newest() -> Self {
        Self::desc("date")
    }

    /// Sort on `field`: same field flips the direction, a new field starts
    /// descending.
    pub fn select(&self, field: &str) -> Self {
        if self.field == field {
            Self::new(field, self.order.toggle())
        } else {
            Self::desc(field)
        }
    }

    /// Compare two documents on this sort's field and direction.
    ///
    /// `date` treats a missing date as the epoch. For other fields a missing
    /// value ranks below any present one, and values of different kinds
    /// compare by kind, so the ordering stays total. An unknown field is
    /// missing on every side and leaves the items in place.
    pub fn compare<D: Document>(&self, a: &D, b: &D) -> Ordering {
        let ordering = if self.field == "date" {
            let a = a.date().unwrap_or_else(Timestamp::epoch);
            let b = b.date().unwrap_or_else(Timestamp::epoch);
            a.cmp(&b)
        } else {
            compare_values(a.field(&self.field), b.field(&self.field))
        };
        self.order.apply(ordering)
    }
}

/// Rank of a value's kind; missing first.
fn kind_rank(value: Option<&FieldValue<'_>>) -> u8 {
    match value {
        None => 0,
        Some(FieldValue::Bool(_)) => 1,
        Some(FieldValue::Number(_)) => 2,
        Some(FieldValue::Date(_)) => 3,
        Some(FieldValue::Text(_)) => 4,
        Some(FieldValue::List(_)) => 5,
    }
}

fn compare_values(a: Option<FieldValue<'_>>, b: Option<FieldValue<'_>>) -> Ordering {
    match (&a, &b) {
        (Some(FieldValue::Text(a)), Some(FieldValue::Text(b))) => locale_cmp(a, b),
        (Some(FieldValue::Number(a)), Some(FieldValue::Number(b))) => a.total_cmp(b),
        (Some(FieldValue::Date(a)), Some(FieldValue::Date(b))) => a.cmp(b),
        (Some(FieldValue::Bool(a)), Some(FieldValue::Bool(b))) => a.cmp(b),
        _ => kind_rank(a.as_ref()).cmp(&kind_rank(b.as_ref())),
    }
}

/// Language-neutral lexical comparison.
///
/// Accents and case are ignored first (`"École" < "epsilon"`); ties fall back
/// to case-insensitive, then exact comparison with lowercase before uppercase.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    deunicode(a)
        .to_lowercase()
        .cmp(&deunicode(b).to_lowercase())
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

/// A stably sorted copy of `items`.
pub fn sort<D: Document + Clone>(items: &[D], sort: &Sort) -> Vec<D> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| sort.compare(a, b));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::test_support::{Doc, doc};

    fn slugs(items: &[Doc]) -> Vec<&str> {
        items.iter().map(|d| d.slug.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date() {
        let items = vec![
            doc("b", "2024-02-01", &[]),
            doc("a", "2024-01-01", &[]),
            doc("c", "2024-03-01", &[]),
        ];
        assert_eq!(slugs(&sort(&items, &Sort::newest())), ["c", "b", "a"]);
        assert_eq!(slugs(&sort(&items, &Sort::asc("date"))), ["a", "b", "c"]);
    }

    #[test]
    fn test_missing_date_sorts_as_epoch() {
        let mut undated = doc("undated", "2024-01-01", &[]);
        undated.date = None;
        let items = vec![undated, doc("dated", "1999-12-31", &[])];
        assert_eq!(slugs(&sort(&items, &Sort::asc("date"))), ["undated", "dated"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let items = vec![
            doc("first", "2024-01-01", &[]),
            doc("second", "2024-01-01", &[]),
            doc("third", "2024-01-01", &[]),
        ];
        assert_eq!(
            slugs(&sort(&items, &Sort::newest())),
            ["first", "second", "third"]
        );
    }

    #[test]
    fn test_sort_by_title_locale_aware() {
        let mut items = vec![
            doc("z", "2024-01-01", &[]),
            doc("e", "2024-01-01", &[]),
            doc("a", "2024-01-01", &[]),
        ];
        items[0].title = "zebra".into();
        items[1].title = "École".into();
        items[2].title = "Apple".into();
        assert_eq!(slugs(&sort(&items, &Sort::asc("title"))), ["a", "e", "z"]);
    }

    #[test]
    fn test_sort_by_number() {
        let mut items = vec![
            doc("c", "2024-01-01", &[]),
            doc("a", "2024-01-01", &[]),
            doc("b", "2024-01-01", &[]),
        ];
        items[0].order = Some(3.0);
        items[1].order = Some(1.0);
        items[2].order = Some(2.0);
        assert_eq!(slugs(&sort(&items, &Sort::asc("order"))), ["a", "b", "c"]);
    }

    #[test]
    fn test_missing_values_rank_first() {
        // Every other document has no `order`; present values are shuffled.
        let items: Vec<Doc> = (0..30)
            .map(|i| {
                let mut d = doc(&format!("d{i:02}"), "2024-01-01", &[]);
                if i % 2 == 0 {
                    d.order = Some(((i * 7) % 30) as f64);
                }
                d
            })
            .collect();

        let asc = sort(&items, &Sort::asc("order"));
        let (missing, present) = asc.split_at(15);
        assert!(missing.iter().all(|d| d.order.is_none()));
        // Items without a value keep their original order
        assert_eq!(&slugs(missing)[..3], ["d01", "d03", "d05"]);
        let values: Vec<f64> = present.iter().filter_map(|d| d.order).collect();
        assert_eq!(values.len(), 15);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));

        let desc = sort(&items, &Sort::desc("order"));
        let values: Vec<f64> = desc[..15].iter().filter_map(|d| d.order).collect();
        assert_eq!(values.len(), 15);
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        assert!(desc[15..].iter().all(|d| d.order.is_none()));
    }

    #[test]
    fn test_unknown_field_keeps_order() {
        let items = vec![
            doc("b", "2024-02-01", &[]),
            doc("a", "2024-01-01", &[]),
            doc("c", "2024-03-01", &[]),
        ];
        assert_eq!(slugs(&sort(&items, &Sort::asc("nope"))), ["b", "a", "c"]);
    }

    #[test]
    fn test_locale_cmp() {
        assert_eq!(locale_cmp("école", "Ecole"), Ordering::Greater);
        assert_eq!(locale_cmp("école", "f"), Ordering::Less);
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }

    #[test]
    fn test_select_toggles() {
        let sort = Sort::newest();
        assert_eq!(sort.select("date").order, SortOrder::Asc);
        assert_eq!(sort.select("date").select("date").order, SortOrder::Desc);
        assert_eq!(sort.select("title"), Sort::desc("title"));
    }
}

use std::collections::HashSet;
use std::fmt::Debug;

use chrono::NaiveDateTime;

use crate::error::{Result, ShopError};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any record held by the [`EntityStore`](super::EntityStore) must implement.
pub trait Entity: Clone + Send + Sync + 'static {
    type CreatePayload: Send + Debug;

    /// Prefix for generated ids, also used as the entity label in `NotFound` errors.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn created_at(&self) -> NaiveDateTime;

    /// Construct the full record from the assigned id, the insertion time and the payload.
    ///
    /// Validation failures surface here, before the record reaches the collection.
    fn from_create(id: String, created_at: NaiveDateTime, payload: Self::CreatePayload) -> Result<Self>;
}

// =============================================================================
// 2. ID GENERATION
// =============================================================================

/// Monotonic `<kind>_<n>` id generator.
#[derive(Debug, Clone)]
pub struct IdSequence {
    prefix: &'static str,
    next: u64,
}

impl IdSequence {
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix, next: 1 }
    }

    fn peek(&self) -> String {
        format!("{}_{}", self.prefix, self.next)
    }

    fn advance(&mut self) -> Result<()> {
        self.next = self
            .next
            .checked_add(1)
            .ok_or_else(|| ShopError::validation(format!("{} id sequence exhausted", self.prefix)))?;
        Ok(())
    }

    /// Moves the sequence past `id` if it was produced by this generator.
    ///
    /// # Errors
    /// Returns `Persistence` if no id can follow `id`.
    fn observe(&mut self, id: &str) -> Result<()> {
        let seq = id
            .strip_prefix(self.prefix)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|n| n.parse::<u64>().ok());
        if let Some(seq) = seq {
            if seq >= self.next {
                self.next = seq
                    .checked_add(1)
                    .ok_or_else(|| ShopError::Persistence(format!("{} id out of range: {}", self.prefix, id)))?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// 3. THE ORDERED COLLECTION
// =============================================================================

/// Insertion-ordered sequence of records with id assignment.
#[derive(Debug, Clone)]
pub struct Collection<T: Entity> {
    items: Vec<T>,
    ids: IdSequence,
}

impl<T: Entity> Default for Collection<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Collection<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            ids: IdSequence::new(T::KIND),
        }
    }

    /// Rebuilds a collection from previously stored records, keeping their order.
    ///
    /// # Errors
    /// Returns `Persistence` if two records share an id or an id leaves no room for the next one.
    pub fn from_records(items: Vec<T>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        let mut ids = IdSequence::new(T::KIND);
        for item in &items {
            if !seen.insert(item.id().to_string()) {
                return Err(ShopError::Persistence(format!(
                    "duplicate {} id: {}",
                    T::KIND,
                    item.id()
                )));
            }
            ids.observe(item.id())?;
        }
        Ok(Self { items, ids })
    }

    /// Builds a record with a fresh id without appending it.
    ///
    /// Used when a record must only land once a related mutation has succeeded.
    pub fn build(&mut self, payload: T::CreatePayload, now: NaiveDateTime) -> Result<T> {
        let item = T::from_create(self.ids.peek(), now, payload)?;
        self.ids.advance()?;
        Ok(item)
    }

    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Assigns an id and timestamp, appends, and returns the stored record.
    pub fn insert(&mut self, payload: T::CreatePayload, now: NaiveDateTime) -> Result<T> {
        let item = self.build(payload, now)?;
        self.items.push(item.clone());
        Ok(item)
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Replaces the record matching `id` with the result of `update`.
    ///
    /// `update` runs against a copy; the stored record only changes when it succeeds.
    pub fn mutate<R>(&mut self, id: &str, update: impl FnOnce(&mut T) -> Result<R>) -> Result<R> {
        let slot = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or_else(|| ShopError::not_found(T::KIND, id))?;
        let mut updated = slot.clone();
        let result = update(&mut updated)?;
        *slot = updated;
        Ok(result)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Clone, Debug, PartialEq)]
    struct Note {
        id: String,
        text: String,
        created_at: NaiveDateTime,
    }

    impl Entity for Note {
        type CreatePayload = String;
        const KIND: &'static str = "note";

        fn id(&self) -> &str {
            &self.id
        }

        fn created_at(&self) -> NaiveDateTime {
            self.created_at
        }

        fn from_create(id: String, created_at: NaiveDateTime, text: String) -> Result<Self> {
            if text.is_empty() {
                return Err(ShopError::validation("text required"));
            }
            Ok(Self { id, text, created_at })
        }
    }

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_insert_assigns_sequential_ids_in_order() {
        let mut notes = Collection::<Note>::new();
        let a = notes.insert("a".into(), at(9)).unwrap();
        let b = notes.insert("b".into(), at(10)).unwrap();

        assert_eq!(a.id, "note_1");
        assert_eq!(b.id, "note_2");
        assert_eq!(b.created_at, at(10));
        let texts: Vec<_> = notes.as_slice().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["a", "b"]);
    }

    #[test]
    fn test_rejected_insert_does_not_consume_an_id() {
        let mut notes = Collection::<Note>::new();
        assert!(notes.insert(String::new(), at(9)).is_err());
        assert!(notes.is_empty());

        let a = notes.insert("a".into(), at(9)).unwrap();
        assert_eq!(a.id, "note_1");
    }

    #[test]
    fn test_mutate_failure_leaves_record_untouched() {
        let mut notes = Collection::<Note>::new();
        notes.insert("a".into(), at(9)).unwrap();
        notes.insert("b".into(), at(10)).unwrap();

        let result: Result<()> = notes.mutate("note_1", |note| {
            note.text = "changed".into();
            Err(ShopError::validation("nope"))
        });
        assert!(result.is_err());
        assert_eq!(notes.get("note_1").unwrap().text, "a");

        notes
            .mutate("note_1", |note| {
                note.text = "changed".into();
                Ok(())
            })
            .unwrap();
        assert_eq!(notes.as_slice()[0].text, "changed");
        assert_eq!(notes.as_slice()[1].text, "b");
    }

    #[test]
    fn test_mutate_unknown_id_reports_not_found() {
        let mut notes = Collection::<Note>::new();
        let err = notes.mutate("note_9", |_| Ok(())).unwrap_err();
        assert_eq!(err, ShopError::not_found("note", "note_9"));
    }

    #[test]
    fn test_from_records_continues_past_restored_ids() {
        let restored = vec![
            Note { id: "note_4".into(), text: "x".into(), created_at: at(8) },
            Note { id: "imported".into(), text: "y".into(), created_at: at(9) },
        ];
        let mut notes = Collection::from_records(restored).unwrap();
        let next = notes.insert("z".into(), at(10)).unwrap();
        assert_eq!(next.id, "note_5");
        assert_eq!(notes.len(), 3);
    }

    #[test]
    fn test_from_records_rejects_duplicate_ids() {
        let dup = vec![
            Note { id: "note_1".into(), text: "x".into(), created_at: at(8) },
            Note { id: "note_1".into(), text: "y".into(), created_at: at(9) },
        ];
        assert!(matches!(Collection::from_records(dup), Err(ShopError::Persistence(_))));
    }

    #[test]
    fn test_from_records_rejects_exhausted_id_sequence() {
        let last = vec![Note { id: format!("note_{}", u64::MAX), text: "x".into(), created_at: at(8) }];
        assert!(matches!(Collection::from_records(last), Err(ShopError::Persistence(_))));

        let almost = vec![Note { id: format!("note_{}", u64::MAX - 1), text: "x".into(), created_at: at(8) }];
        let mut notes = Collection::from_records(almost).unwrap();
        assert!(matches!(notes.insert("y".into(), at(9)), Err(ShopError::Validation(_))));
        assert_eq!(notes.len(), 1);
    }
}

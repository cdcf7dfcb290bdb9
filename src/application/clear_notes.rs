//! Notebook maintenance use case

use crate::error::{BlocknotesError, Result};
use crate::infrastructure::NoteStore;

/// Delete every note. Requires explicit confirmation.
pub fn clear_notes(store: &mut NoteStore, confirmed: bool) -> Result<usize> {
    if !confirmed {
        return Err(BlocknotesError::InvalidInput(
            "Refusing to delete all notes without confirmation (pass --yes)".to_string(),
        ));
    }
    store.delete_all()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Note;

    #[test]
    fn test_clear_requires_confirmation() {
        let mut store = NoteStore::open_in_memory().unwrap();
        store.save_note(&mut Note::new("keep")).unwrap();

        assert!(matches!(
            clear_notes(&mut store, false),
            Err(BlocknotesError::InvalidInput(_))
        ));
        assert_eq!(store.count_notes().unwrap(), 1);
    }

    #[test]
    fn test_clear_deletes_everything() {
        let mut store = NoteStore::open_in_memory().unwrap();
        store.save_note(&mut Note::new("a")).unwrap();
        store.save_note(&mut Note::new("b")).unwrap();

        assert_eq!(clear_notes(&mut store, true).unwrap(), 2);
        assert_eq!(store.count_notes().unwrap(), 0);
    }
}

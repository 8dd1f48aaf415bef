//! Study item abstraction shared by worksheets and todos.

use crate::Time;

/// Anything the analytics layer can count as study activity.
///
/// Only the completion flag and the creation timestamp are consulted; the
/// rest of a worksheet or todo is irrelevant to streaks and heatmaps.
pub trait StudyItem {
    /// Whether the item has been marked as done.
    fn is_completed(&self) -> bool;

    /// When the item was created.
    fn created_at(&self) -> Time;
}

impl<T: StudyItem + ?Sized> StudyItem for &T {
    fn is_completed(&self) -> bool {
        (**self).is_completed()
    }

    fn created_at(&self) -> Time {
        (**self).created_at()
    }
}

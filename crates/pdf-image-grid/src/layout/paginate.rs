//! Page batching
//!
//! Splits the ordered image list into one batch per physical page and
//! assigns every image a slot on its page.

use super::{GridLayout, GridPosition, grid_position};

/// The contiguous group of items assigned to one physical page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBatch<'a, T> {
    /// 1-based page number
    pub page_number: usize,
    /// Index of the first item of this batch in the full list
    pub first_index: usize,
    pub items: &'a [T],
}

/// One item of a batch with its slot on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotAssignment<'a, T> {
    /// Position within the page (0..batch len)
    pub slot: usize,
    /// Cell of the slot; `None` when the slot lies past the last grid cell
    pub grid_pos: Option<GridPosition>,
    pub item: &'a T,
}

impl<'a, T> PageBatch<'a, T> {
    pub fn is_first(&self) -> bool {
        self.page_number == 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Slots of this batch in order, mapped onto `grid`
    pub fn slots(&self, grid: &GridLayout) -> impl Iterator<Item = SlotAssignment<'a, T>> {
        let items: &'a [T] = self.items;
        items
            .iter()
            .enumerate()
            .map(move |(slot, item)| SlotAssignment {
                slot,
                grid_pos: grid_position(slot, grid),
                item,
            })
    }
}

/// Lazily split `items` into page batches of up to `per_page` items.
///
/// Batches are never empty; only the last one may be partial.
pub fn paginate<T>(items: &[T], per_page: usize) -> impl Iterator<Item = PageBatch<'_, T>> {
    let per_page = per_page.max(1);
    items
        .chunks(per_page)
        .enumerate()
        .map(move |(index, chunk)| PageBatch {
            page_number: index + 1,
            first_index: index * per_page,
            items: chunk,
        })
}

/// Number of physical pages needed for `total` items
pub fn page_count(total: usize, per_page: usize) -> usize {
    total.div_ceil(per_page.max(1))
}

#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session-keyed retention of generated layout sets.
//!
//! Front ends generate a layout set once and let users browse it afterwards;
//! this adapter owns that retained state. Each stored set is addressed by an
//! opaque [`SessionKey`] minted at insertion time, and can be read back
//! whole, by layout index, or in fixed-size pages. The generation core has
//! no awareness of keys or paging.

use std::collections::HashMap;
use std::fmt::{self, Write as _};

use floorplan_core::{Layout, PlotSize, RoomSpec};
use sha2::{Digest, Sha256};

/// Opaque key addressing one stored generation result.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    /// String form of the key, suitable for URLs and logs.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generation result retained for later browsing.
#[derive(Clone, Debug, PartialEq)]
pub struct StoredGeneration {
    layouts: Vec<Layout>,
    plot: PlotSize,
    rooms: Vec<RoomSpec>,
}

impl StoredGeneration {
    /// Bundles a finished generation run for storage.
    #[must_use]
    pub fn new(layouts: Vec<Layout>, plot: PlotSize, rooms: Vec<RoomSpec>) -> Self {
        Self {
            layouts,
            plot,
            rooms,
        }
    }

    /// Layouts produced by the run, in generation order.
    #[must_use]
    pub fn layouts(&self) -> &[Layout] {
        &self.layouts
    }

    /// Plot dimensions the layouts were generated for.
    #[must_use]
    pub const fn plot(&self) -> PlotSize {
        self.plot
    }

    /// Room specifications the run was requested with.
    #[must_use]
    pub fn rooms(&self) -> &[RoomSpec] {
        &self.rooms
    }

    /// Number of layouts retained in the record.
    #[must_use]
    pub fn layout_count(&self) -> usize {
        self.layouts.len()
    }
}

/// One page cut from a stored generation's layout list.
#[derive(Clone, Copy, Debug)]
pub struct SessionPage<'a> {
    page: u32,
    pages: u32,
    first_index: usize,
    layouts: &'a [Layout],
}

impl<'a> SessionPage<'a> {
    /// One-based number of this page after clamping.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Total number of pages available for the record.
    #[must_use]
    pub const fn pages(&self) -> u32 {
        self.pages
    }

    /// Index of the page's first layout within the full list.
    #[must_use]
    pub const fn first_index(&self) -> usize {
        self.first_index
    }

    /// Layouts on this page, in generation order.
    #[must_use]
    pub const fn layouts(&self) -> &'a [Layout] {
        self.layouts
    }
}

/// In-memory store mapping opaque session keys to generation results.
#[derive(Debug, Default)]
pub struct SessionStore {
    entries: HashMap<SessionKey, StoredGeneration>,
    insertions: u64,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Retains a generation result and mints the key that addresses it.
    #[must_use]
    pub fn insert(&mut self, record: StoredGeneration) -> SessionKey {
        self.insertions += 1;
        let key = derive_key(self.insertions, &record);
        let _ = self.entries.insert(key.clone(), record);
        key
    }

    /// Retrieves a stored record by its key.
    #[must_use]
    pub fn get(&self, key: &SessionKey) -> Option<&StoredGeneration> {
        self.entries.get(key)
    }

    /// Retrieves one layout of a stored record by index.
    #[must_use]
    pub fn layout(&self, key: &SessionKey, index: usize) -> Option<&Layout> {
        self.entries.get(key)?.layouts.get(index)
    }

    /// Cuts a page out of a stored record's layout list.
    ///
    /// Page numbers are one-based and clamped into the valid range; a zero
    /// `per_page` is treated as one. Returns `None` for unknown keys and for
    /// records that retained no layouts.
    #[must_use]
    pub fn page(&self, key: &SessionKey, page: u32, per_page: u32) -> Option<SessionPage<'_>> {
        let record = self.entries.get(key)?;
        let total = record.layouts.len();
        if total == 0 {
            return None;
        }

        let per_page = per_page.max(1) as usize;
        let pages = ((total + per_page - 1) / per_page) as u32;
        let page = page.clamp(1, pages);

        let first_index = (page as usize - 1) * per_page;
        let end = (first_index + per_page).min(total);

        Some(SessionPage {
            page,
            pages,
            first_index,
            layouts: &record.layouts[first_index..end],
        })
    }

    /// Number of records currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keys mix a monotonic insertion counter into a content digest, so equal
/// requests stored twice still receive distinct keys.
fn derive_key(insertion: u64, record: &StoredGeneration) -> SessionKey {
    let mut hasher = Sha256::new();
    hasher.update(insertion.to_le_bytes());
    hasher.update(record.plot().width().to_le_bytes());
    hasher.update(record.plot().height().to_le_bytes());
    hasher.update((record.rooms().len() as u64).to_le_bytes());
    hasher.update((record.layout_count() as u64).to_le_bytes());
    for room in record.rooms() {
        hasher.update(room.id().get().to_le_bytes());
        hasher.update(room.width().to_le_bytes());
        hasher.update(room.height().to_le_bytes());
    }

    let digest = hasher.finalize();
    let mut key = String::with_capacity(32);
    for byte in &digest[..16] {
        write!(key, "{byte:02x}").expect("writing to a string never fails");
    }
    SessionKey(key)
}

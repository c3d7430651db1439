//! Page bar generation.
//!
//! A [`PageBar`] describes which page links to show around the current page.
//! Iterating it yields `(page_index, PageEntry)` pairs in ascending index
//! order; the iteration is computed on the fly and can be restarted by calling
//! [`PageBar::iter`] again.

use serde::{Deserialize, Serialize};

/// Default number of pages shown on each side of the current page.
pub const DEFAULT_RADIUS: u32 = 5;

/// Label used for collapsed page runs.
pub const ELLIPSIS: &str = "..";

/// Kind of a page bar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageKind {
    /// A page the user can navigate to.
    Link,
    /// The page being displayed.
    Current,
    /// A non-linking marker for skipped pages.
    Text,
}

/// One entry of the page bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageEntry {
    pub kind: PageKind,
    /// One-based page number, or [`ELLIPSIS`] for text entries.
    pub label: String,
    /// Link target for `Link` entries when a template was supplied.
    pub href: Option<String>,
}

/// Page bar around a current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBar {
    current: u32,
    pages: u32,
    radius: u32,
    href_template: Option<String>,
}

impl PageBar {
    /// Creates a page bar for a zero-based `current` page out of `pages`.
    pub fn new(current: u32, pages: u32) -> Self {
        Self {
            current,
            pages,
            radius: DEFAULT_RADIUS,
            href_template: None,
        }
    }

    /// Sets how many pages are shown on each side of the current one.
    pub fn with_radius(mut self, radius: u32) -> Self {
        self.radius = radius;
        self
    }

    /// Sets a link template; `{page}` is replaced with the zero-based index.
    pub fn with_href_template(mut self, template: impl Into<String>) -> Self {
        self.href_template = Some(template.into());
        self
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn pages(&self) -> u32 {
        self.pages
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> PageBarIter<'_> {
        // The bar always reaches the current page, even past the reported count.
        let span = if self.pages == 0 {
            0
        } else {
            self.pages.max(self.current.saturating_add(1))
        };
        let last = span.saturating_sub(1);
        let start = self.current.saturating_sub(self.radius).min(last);
        let end = self.current.saturating_add(self.radius).min(last);

        PageBarIter {
            bar: self,
            start,
            end,
            last,
            next: (span > 0).then_some(0),
        }
    }

    fn entry(&self, kind: PageKind, index: u32) -> PageEntry {
        let label = match kind {
            PageKind::Text => ELLIPSIS.to_string(),
            PageKind::Link | PageKind::Current => (u64::from(index) + 1).to_string(),
        };
        let href = match kind {
            PageKind::Link => self
                .href_template
                .as_ref()
                .map(|template| template.replace("{page}", &index.to_string())),
            PageKind::Current | PageKind::Text => None,
        };
        PageEntry { kind, label, href }
    }
}

impl<'a> IntoIterator for &'a PageBar {
    type Item = (u32, PageEntry);
    type IntoIter = PageBarIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over page bar entries.
#[derive(Debug, Clone)]
pub struct PageBarIter<'a> {
    bar: &'a PageBar,
    start: u32,
    end: u32,
    last: u32,
    next: Option<u32>,
}

impl PageBarIter<'_> {
    fn kind_of(&self, index: u32) -> PageKind {
        if index == self.bar.current {
            PageKind::Current
        } else if (self.start..=self.end).contains(&index) || index == 0 || index == self.last {
            PageKind::Link
        } else if index < self.start && self.start - 1 == 1 {
            // a run of one hidden page is linked instead of elided
            PageKind::Link
        } else if index > self.end && self.last - self.end == 2 {
            PageKind::Link
        } else {
            PageKind::Text
        }
    }

    fn successor(&self, index: u32) -> Option<u32> {
        if index == self.last {
            None
        } else if index < self.start {
            // page 0, then one entry standing for the hidden run before the window
            if index == 0 && self.start > 1 {
                Some(1)
            } else {
                Some(self.start)
            }
        } else if index <= self.end {
            Some(index + 1)
        } else {
            Some(self.last)
        }
    }
}

impl Iterator for PageBarIter<'_> {
    type Item = (u32, PageEntry);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        self.next = self.successor(index);
        Some((index, self.bar.entry(self.kind_of(index), index)))
    }
}

//! Search parameters sent to the service.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::proxy::ProxyConfig;
use crate::{Result, SearchError};

/// Interface language of the result snippets (`l10n` URL parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Ru,
    Uk,
    Be,
    Kk,
    Tr,
    En,
}

impl Locale {
    /// Returns the wire code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::Uk => "uk",
            Self::Be => "be",
            Self::Kk => "kk",
            Self::Tr => "tr",
            Self::En => "en",
        }
    }
}

impl FromStr for Locale {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "ru" => Ok(Self::Ru),
            "uk" => Ok(Self::Uk),
            "be" => Ok(Self::Be),
            "kk" => Ok(Self::Kk),
            "tr" => Ok(Self::Tr),
            "en" => Ok(Self::En),
            other => Err(SearchError::InvalidConfiguration(format!(
                "unknown locale '{}'",
                other
            ))),
        }
    }
}

/// Adult content filter level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFilter {
    Strict,
    Moderate,
    None,
}

impl ContentFilter {
    /// Returns the wire code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Moderate => "moderate",
            Self::None => "none",
        }
    }
}

impl FromStr for ContentFilter {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strict" => Ok(Self::Strict),
            "moderate" => Ok(Self::Moderate),
            "none" => Ok(Self::None),
            other => Err(SearchError::InvalidConfiguration(format!(
                "unknown content filter '{}'",
                other
            ))),
        }
    }
}

/// Result ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// By relevance (`rlv`).
    #[default]
    Relevance,
    /// By document modification time (`tm`).
    ModifiedTime,
}

impl SortBy {
    /// Returns the wire code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Relevance => "rlv",
            Self::ModifiedTime => "tm",
        }
    }
}

impl FromStr for SortBy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rlv" => Ok(Self::Relevance),
            "tm" => Ok(Self::ModifiedTime),
            other => Err(SearchError::InvalidConfiguration(format!(
                "unknown sort order '{}', expected 'rlv' or 'tm'",
                other
            ))),
        }
    }
}

/// Result grouping attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    /// No grouping (empty `attr`).
    #[default]
    None,
    /// Group documents by site (`d`).
    Site,
}

impl GroupBy {
    /// Returns the wire code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Site => "d",
        }
    }
}

impl FromStr for GroupBy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "" => Ok(Self::None),
            "d" => Ok(Self::Site),
            other => Err(SearchError::InvalidConfiguration(format!(
                "unknown grouping '{}', expected '' or 'd'",
                other
            ))),
        }
    }
}

/// Grouping mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMode {
    #[default]
    Flat,
    Deep,
    Wide,
}

impl GroupMode {
    /// Returns the wire code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Deep => "deep",
            Self::Wide => "wide",
        }
    }
}

impl FromStr for GroupMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "flat" => Ok(Self::Flat),
            "deep" => Ok(Self::Deep),
            "wide" => Ok(Self::Wide),
            other => Err(SearchError::InvalidConfiguration(format!(
                "unknown group mode '{}'",
                other
            ))),
        }
    }
}

pub const MAX_PASSAGES: &str = "maxpassages";
pub const MAX_TITLE_LENGTH: &str = "max-title-length";
pub const MAX_HEADLINE_LENGTH: &str = "max-headline-length";
pub const MAX_PASSAGE_LENGTH: &str = "max-passage-length";
pub const MAX_TEXT_LENGTH: &str = "max-text-length";

/// Default snippet options, in the order they appear in the request document.
pub const DEFAULT_OPTIONS: [(&str, u32); 5] = [
    (MAX_PASSAGES, 2),
    (MAX_TITLE_LENGTH, 160),
    (MAX_HEADLINE_LENGTH, 160),
    (MAX_PASSAGE_LENGTH, 160),
    (MAX_TEXT_LENGTH, 640),
];

/// Snippet options: [`DEFAULT_OPTIONS`] merged with caller overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOptions {
    values: BTreeMap<String, u32>,
}

impl SearchOptions {
    /// Creates the default option set.
    pub fn new() -> Self {
        Self {
            values: DEFAULT_OPTIONS
                .iter()
                .map(|(name, value)| (name.to_string(), *value))
                .collect(),
        }
    }

    /// Returns an option value, or `None` if it was never set.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.values.get(name).copied()
    }

    /// Overrides an option. Values must be positive; `maxpassages` is limited to 2..=5.
    pub fn set(&mut self, name: impl Into<String>, value: u32) -> Result<()> {
        let name = name.into();
        if value == 0 {
            return Err(SearchError::InvalidConfiguration(format!(
                "option '{}' must be positive",
                name
            )));
        }
        if name == MAX_PASSAGES && !(2..=5).contains(&value) {
            return Err(SearchError::InvalidConfiguration(format!(
                "option '{}' must be between 2 and 5, got {}",
                name, value
            )));
        }
        self.values.insert(name, value);
        Ok(())
    }

    /// Returns the five request-document options in wire order.
    pub fn wire_fields(&self) -> impl Iterator<Item = (&'static str, u32)> + '_ {
        DEFAULT_OPTIONS
            .into_iter()
            .map(move |(name, default)| (name, self.get(name).unwrap_or(default)))
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// All parameters of a single search request.
///
/// Getters are plain borrows; every `with_*` setter consumes and returns the
/// parameters so calls can be chained. Setters that can reject a value return
/// [`Result`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchParameters {
    query: String,
    hosts: Vec<String>,
    sites: Vec<String>,
    domains: Vec<String>,
    cat: Option<u32>,
    geo: Option<u32>,
    theme: Option<u32>,
    region: Option<u32>,
    locale: Option<Locale>,
    filter: Option<ContentFilter>,
    page: u32,
    limit: u32,
    sort_by: SortBy,
    group_by: GroupBy,
    group_mode: GroupMode,
    options: SearchOptions,
    proxy: Option<ProxyConfig>,
}

/// Default number of results per page.
pub const DEFAULT_LIMIT: u32 = 10;

// Blank entries are dropped so that an empty filter never reaches the query.
fn filter_values<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values
        .into_iter()
        .map(Into::into)
        .filter(|value: &String| !value.trim().is_empty())
        .collect()
}

impl SearchParameters {
    /// Creates parameters for the given query text.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            hosts: Vec::new(),
            sites: Vec::new(),
            domains: Vec::new(),
            cat: None,
            geo: None,
            theme: None,
            region: None,
            locale: None,
            filter: None,
            page: 0,
            limit: DEFAULT_LIMIT,
            sort_by: SortBy::Relevance,
            group_by: GroupBy::None,
            group_mode: GroupMode::Flat,
            options: SearchOptions::new(),
            proxy: None,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Host filters; more than one means any of them.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }

    /// Catalog category code.
    pub fn cat(&self) -> Option<u32> {
        self.cat
    }

    pub fn geo(&self) -> Option<u32> {
        self.geo
    }

    pub fn theme(&self) -> Option<u32> {
        self.theme
    }

    /// Search region (`lr` URL parameter).
    pub fn region(&self) -> Option<u32> {
        self.region
    }

    pub fn locale(&self) -> Option<Locale> {
        self.locale
    }

    pub fn filter(&self) -> Option<ContentFilter> {
        self.filter
    }

    /// Zero-based page index.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Results per page; never zero.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn sort_by(&self) -> SortBy {
        self.sort_by
    }

    pub fn group_by(&self) -> GroupBy {
        self.group_by
    }

    pub fn group_mode(&self) -> GroupMode {
        self.group_mode
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Returns a single option value.
    pub fn option(&self, name: &str) -> Option<u32> {
        self.options.get(name)
    }

    pub fn proxy(&self) -> Option<&ProxyConfig> {
        self.proxy.as_ref()
    }

    /// Sets the query text.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Restricts results to a single host.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.hosts = filter_values([host]);
        self
    }

    /// Restricts results to any of the given hosts.
    pub fn with_hosts<I, S>(mut self, hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.hosts = filter_values(hosts);
        self
    }

    /// Restricts results to a single site.
    pub fn with_site(mut self, site: impl Into<String>) -> Self {
        self.sites = filter_values([site]);
        self
    }

    /// Restricts results to any of the given sites.
    pub fn with_sites<I, S>(mut self, sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sites = filter_values(sites);
        self
    }

    /// Restricts results to a single domain zone.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domains = filter_values([domain]);
        self
    }

    /// Restricts results to any of the given domain zones.
    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.domains = filter_values(domains);
        self
    }

    /// Sets the catalog category code; zero clears it.
    pub fn with_cat(mut self, cat: u32) -> Self {
        self.cat = (cat != 0).then_some(cat);
        self
    }

    /// Sets the geo code; zero clears it.
    pub fn with_geo(mut self, geo: u32) -> Self {
        self.geo = (geo != 0).then_some(geo);
        self
    }

    /// Sets the theme code; zero clears it.
    pub fn with_theme(mut self, theme: u32) -> Self {
        self.theme = (theme != 0).then_some(theme);
        self
    }

    /// Sets the search region; zero clears it.
    pub fn with_region(mut self, region: u32) -> Self {
        self.region = (region != 0).then_some(region);
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = Some(locale);
        self
    }

    pub fn with_filter(mut self, filter: ContentFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Sets the zero-based page index.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    /// Sets the number of results per page.
    pub fn with_limit(mut self, limit: u32) -> Result<Self> {
        if limit == 0 {
            return Err(SearchError::InvalidConfiguration(
                "limit must be greater than zero".to_string(),
            ));
        }
        self.limit = limit;
        Ok(self)
    }

    pub fn with_sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Sets grouping. `GroupBy::None` always uses `GroupMode::Flat`.
    pub fn with_group_by(mut self, group_by: GroupBy, mode: GroupMode) -> Self {
        self.group_by = group_by;
        self.group_mode = match group_by {
            GroupBy::None => GroupMode::Flat,
            GroupBy::Site => mode,
        };
        self
    }

    /// Overrides a snippet option.
    pub fn with_option(mut self, name: impl Into<String>, value: u32) -> Result<Self> {
        self.options.set(name, value)?;
        Ok(self)
    }

    /// Routes requests through a proxy. A config with an empty host disables proxying.
    pub fn with_proxy(mut self, proxy: ProxyConfig) -> Self {
        self.proxy = (!proxy.host.is_empty()).then_some(proxy);
        self
    }
}

impl Default for SearchParameters {
    fn default() -> Self {
        Self::new("")
    }
}

//! Browse criteria — the optional, independent constraints a listing query applies.
//!
//! Criteria are built fresh per request from the raw query-string pairs.
//! Malformed inputs never fail a request: unknown category names, unknown
//! band or order codes, and unparsable page numbers degrade to "no
//! restriction" or the default.

/// The fixed set of listing categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobCategory {
    It,
    Law,
    Education,
    Media,
    Finance,
    Marketing,
    Design,
    Other,
}

impl JobCategory {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "IT" => Some(Self::It),
            "Law" => Some(Self::Law),
            "Education" => Some(Self::Education),
            "Media" => Some(Self::Media),
            "Finance" => Some(Self::Finance),
            "Marketing" => Some(Self::Marketing),
            "Design" => Some(Self::Design),
            "Other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::It => "IT",
            Self::Law => "Law",
            Self::Education => "Education",
            Self::Media => "Media",
            Self::Finance => "Finance",
            Self::Marketing => "Marketing",
            Self::Design => "Design",
            Self::Other => "Other",
        }
    }
}

/// One of four exhaustive, mutually exclusive salary ranges.
/// Selected bands combine with OR; every non-negative salary falls in
/// exactly one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalaryBand {
    UpTo50k,
    To100k,
    To150k,
    Above150k,
}

impl SalaryBand {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::UpTo50k),
            "2" => Some(Self::To100k),
            "3" => Some(Self::To150k),
            "4" => Some(Self::Above150k),
            _ => None,
        }
    }

    /// Range bounds as (exclusive minimum, inclusive maximum).
    pub fn bounds(self) -> (Option<i64>, Option<i64>) {
        match self {
            Self::UpTo50k => (None, Some(50_000)),
            Self::To100k => (Some(50_000), Some(100_000)),
            Self::To150k => (Some(100_000), Some(150_000)),
            Self::Above150k => (Some(150_000), None),
        }
    }
}

/// Result ordering for a browse request. Codes mirror the filter form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum JobOrder {
    #[default]
    NewestFirst,
    OldestFirst,
    HighestSalary,
    LowestSalary,
}

impl JobOrder {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(Self::NewestFirst),
            "2" => Some(Self::OldestFirst),
            "3" => Some(Self::HighestSalary),
            "4" => Some(Self::LowestSalary),
            _ => None,
        }
    }

    /// ORDER BY clause body. Listings without a salary sort last under
    /// salary orderings so they never outrank priced listings.
    pub fn sql(self) -> &'static str {
        match self {
            Self::NewestFirst => "date_posted DESC",
            Self::OldestFirst => "date_posted ASC",
            Self::HighestSalary => "salary DESC NULLS LAST",
            Self::LowestSalary => "salary ASC NULLS LAST",
        }
    }
}

/// All constraints of one browse request. Every field is optional; an
/// empty set means no restriction on that axis.
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    pub search: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub categories: Vec<JobCategory>,
    pub salary_bands: Vec<SalaryBand>,
    pub order: JobOrder,
    /// 1-indexed. Values below 1 yield an empty page, never an error.
    pub page: i64,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: None,
            company: None,
            location: None,
            categories: Vec::new(),
            salary_bands: Vec::new(),
            order: JobOrder::default(),
            page: 1,
        }
    }
}

impl FilterCriteria {
    /// Builds criteria from raw query-string pairs. Repeated keys
    /// (`job_category`, `salary_range`) accumulate; empty values are
    /// treated as absent, matching HTML form submissions.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut criteria = Self::default();

        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "search" => criteria.search = Some(value.to_string()),
                "company" => criteria.company = Some(value.to_string()),
                "location" => criteria.location = Some(value.to_string()),
                "job_category" => {
                    if let Some(category) = JobCategory::from_name(value) {
                        if !criteria.categories.contains(&category) {
                            criteria.categories.push(category);
                        }
                    }
                }
                "salary_range" => {
                    if let Some(band) = SalaryBand::from_code(value) {
                        if !criteria.salary_bands.contains(&band) {
                            criteria.salary_bands.push(band);
                        }
                    }
                }
                "order_by" => {
                    if let Some(order) = JobOrder::from_code(value) {
                        criteria.order = order;
                    }
                }
                "page" => criteria.page = value.parse().unwrap_or(1),
                _ => {}
            }
        }

        criteria
    }
}

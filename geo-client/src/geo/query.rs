//! Query builder for GEO dataset searches
//!
//! Compiles structured search criteria into the Entrez boolean query grammar
//! used by the `gds` database.

/// Builder for constructing GEO dataset search queries
///
/// Terms are always emitted in a fixed order (free text, organism, platform,
/// dataset type) joined with `" AND "`, regardless of the order the builder
/// methods were called in.
///
/// # Example
///
/// ```
/// use geo_client::DatasetQuery;
///
/// let query = DatasetQuery::new()
///     .query("cancer")
///     .organism("human")
///     .build();
///
/// assert_eq!(query, "cancer AND \"human\"[Organism]");
/// ```
#[derive(Debug, Clone, Default)]
pub struct DatasetQuery {
    query: Option<String>,
    organism: Option<String>,
    platform: Option<String>,
    dataset_type: Option<String>,
    accession: Option<String>,
    limit: Option<usize>,
}

impl DatasetQuery {
    /// Create a new dataset query builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text search term, matched against Entrez default fields
    pub fn query<S: Into<String>>(mut self, query: S) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Filter by organism name
    ///
    /// The value is quoted verbatim and qualified with `[Organism]`. Embedded
    /// quotes are passed through unescaped.
    pub fn organism<S: Into<String>>(mut self, organism: S) -> Self {
        self.organism = Some(organism.into());
        self
    }

    /// Filter by platform identifier (e.g. `GPL570`)
    ///
    /// Deliberately emitted as an unqualified `[All Fields]` match rather
    /// than a platform-specific qualifier, so the term also hits records
    /// that mention the platform outside the dedicated field.
    pub fn platform<S: Into<String>>(mut self, platform: S) -> Self {
        self.platform = Some(platform.into());
        self
    }

    /// Filter by dataset type label (e.g. `Expression profiling by array`)
    ///
    /// The value is quoted verbatim and qualified with `[DataSet Type]`.
    pub fn dataset_type<S: Into<String>>(mut self, dataset_type: S) -> Self {
        self.dataset_type = Some(dataset_type.into());
        self
    }

    /// Restrict the search to an exact accession
    ///
    /// Used by the detail lookup path; emitted before any other term.
    pub fn accession<S: Into<String>>(mut self, accession: S) -> Self {
        self.accession = Some(accession.into());
        self
    }

    /// Set the maximum number of results to return (default: 10)
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// The configured result cap, defaulting to 10
    pub fn get_limit(&self) -> usize {
        self.limit.unwrap_or(10)
    }

    /// Build the final Entrez query string
    ///
    /// Compilation never fails; absent optional criteria simply contribute
    /// no term.
    ///
    /// # Example
    ///
    /// ```
    /// use geo_client::DatasetQuery;
    ///
    /// let query = DatasetQuery::new()
    ///     .query("breast cancer")
    ///     .organism("Homo sapiens")
    ///     .platform("GPL570")
    ///     .dataset_type("Expression profiling by array")
    ///     .build();
    ///
    /// assert_eq!(
    ///     query,
    ///     "breast cancer AND \"Homo sapiens\"[Organism] AND GPL570[All Fields] \
    ///      AND \"Expression profiling by array\"[DataSet Type]"
    /// );
    /// ```
    pub fn build(&self) -> String {
        let mut terms = Vec::new();

        if let Some(ref accession) = self.accession {
            terms.push(format!("{}[Accession]", accession));
        }
        if let Some(ref query) = self.query {
            terms.push(query.clone());
        }
        if let Some(ref organism) = self.organism {
            terms.push(format!("\"{}\"[Organism]", organism));
        }
        if let Some(ref platform) = self.platform {
            terms.push(format!("{}[All Fields]", platform));
        }
        if let Some(ref dataset_type) = self.dataset_type {
            terms.push(format!("\"{}\"[DataSet Type]", dataset_type));
        }

        terms.join(" AND ")
    }
}

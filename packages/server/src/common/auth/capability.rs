/// Operations the directory exposes, grouped by whether they mutate.
///
/// Reads are open to anonymous visitors. Every mutation needs a resolved
/// identity; nothing here is role-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Search the catalog by region
    SearchResources,

    /// List the reviews attached to a resource
    ListReviews,

    /// Submit a new healthcare resource
    CreateResource,

    /// Bump a resource's recommendation counter
    RecommendResource,

    /// Attach a review to a resource
    CreateReview,

    /// Read the caller's own account
    ViewOwnAccount,
}

impl Capability {
    /// Check if this capability requires a resolved identity
    pub fn requires_identity(&self) -> bool {
        match self {
            Capability::SearchResources | Capability::ListReviews => false,
            Capability::CreateResource
            | Capability::RecommendResource
            | Capability::CreateReview
            | Capability::ViewOwnAccount => true,
        }
    }
}

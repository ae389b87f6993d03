//! Version set models for APIs and their endpoints.
//!
//! An [`ApiVersionModel`] records which versions an implementation
//! declares, supports, and deprecates. Per-endpoint models are aggregated
//! into API-wide models with set-union semantics, and
//! [`EndpointVersionInfo`] decides whether a concrete version maps to an
//! endpoint explicitly, implicitly, or not at all.

use apiver_core::ApiVersion;
use std::sync::OnceLock;

/// How a version is associated with an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ApiVersionMapping {
    /// No association.
    None,
    /// Declared by the endpoint itself.
    Explicit,
    /// Inherited from the containing API.
    Implicit,
    /// Explicit and implicit together; used with
    /// [`EndpointVersionInfo::resolve`] to request the merged model.
    Combined,
}

/// An immutable record of declared, supported, and deprecated versions.
///
/// All collections are sorted and deduplicated. `implemented` is always
/// the union of `supported` and `deprecated`. A neutral model represents
/// "no version constraint" and keeps every collection empty by
/// convention.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiVersionModel {
    neutral: bool,
    declared: Vec<ApiVersion>,
    implemented: Vec<ApiVersion>,
    supported: Vec<ApiVersion>,
    deprecated: Vec<ApiVersion>,
}

impl ApiVersionModel {
    /// Build from raw sequences; duplicates collapse and order is
    /// normalized to the version total order. A version named in both
    /// `supported` and `deprecated` counts as supported and is dropped
    /// from `deprecated`, the same rule [`aggregate`](Self::aggregate)
    /// applies, so construction and aggregation agree on the invariant.
    pub fn new(
        declared: impl IntoIterator<Item = ApiVersion>,
        supported: impl IntoIterator<Item = ApiVersion>,
        deprecated: impl IntoIterator<Item = ApiVersion>,
    ) -> Self {
        let supported = normalize(supported.into_iter().collect());
        let mut deprecated = normalize(deprecated.into_iter().collect());
        deprecated.retain(|v| supported.binary_search(v).is_err());
        let implemented = union(&supported, &deprecated);
        Self {
            neutral: false,
            declared: normalize(declared.into_iter().collect()),
            implemented,
            supported,
            deprecated,
        }
    }

    pub fn builder() -> ApiVersionModelBuilder {
        ApiVersionModelBuilder::default()
    }

    /// The canonical empty model: nothing declared, nothing implemented,
    /// not neutral. Shared, constructed once per process.
    pub fn empty() -> &'static ApiVersionModel {
        static EMPTY: OnceLock<ApiVersionModel> = OnceLock::new();
        EMPTY.get_or_init(|| ApiVersionModel::new([], [], []))
    }

    /// The shared version-neutral model: applies regardless of version.
    pub fn neutral() -> &'static ApiVersionModel {
        static NEUTRAL: OnceLock<ApiVersionModel> = OnceLock::new();
        NEUTRAL.get_or_init(|| ApiVersionModel {
            neutral: true,
            ..ApiVersionModel::new([], [], [])
        })
    }

    pub fn is_neutral(&self) -> bool {
        self.neutral
    }

    /// Versions explicitly declared by the implementation.
    pub fn declared(&self) -> &[ApiVersion] {
        &self.declared
    }

    /// `supported` ∪ `deprecated`.
    pub fn implemented(&self) -> &[ApiVersion] {
        &self.implemented
    }

    pub fn supported(&self) -> &[ApiVersion] {
        &self.supported
    }

    pub fn deprecated(&self) -> &[ApiVersion] {
        &self.deprecated
    }

    pub fn declares(&self, version: &ApiVersion) -> bool {
        contains(&self.declared, version)
    }

    pub fn implements(&self, version: &ApiVersion) -> bool {
        contains(&self.implemented, version)
    }

    pub fn supports(&self, version: &ApiVersion) -> bool {
        contains(&self.supported, version)
    }

    pub fn deprecates(&self, version: &ApiVersion) -> bool {
        contains(&self.deprecated, version)
    }

    /// Union this model with another.
    ///
    /// A version that is supported anywhere is never reported as
    /// deprecated in the result. The result is neutral only when both
    /// operands are neutral; a single neutral operand contributes empty
    /// sets.
    pub fn aggregate(&self, other: &Self) -> Self {
        if self.neutral && other.neutral {
            return Self::neutral().clone();
        }
        let supported = union(&self.supported, &other.supported);
        let mut deprecated = union(&self.deprecated, &other.deprecated);
        deprecated.retain(|v| supported.binary_search(v).is_err());
        Self {
            neutral: false,
            declared: union(&self.declared, &other.declared),
            implemented: union(&self.implemented, &other.implemented),
            supported,
            deprecated,
        }
    }

    /// N-ary reduction of [`aggregate`](Self::aggregate). An empty
    /// sequence yields the canonical empty model.
    pub fn aggregate_all<'a>(models: impl IntoIterator<Item = &'a Self>) -> Self {
        let mut models = models.into_iter();
        let Some(first) = models.next() else {
            return Self::empty().clone();
        };
        models.fold(first.clone(), |acc, model| acc.aggregate(model))
    }
}

/// Accumulates raw sequences before normalization.
#[derive(Debug, Default)]
pub struct ApiVersionModelBuilder {
    declared: Vec<ApiVersion>,
    supported: Vec<ApiVersion>,
    deprecated: Vec<ApiVersion>,
}

impl ApiVersionModelBuilder {
    pub fn declared(mut self, versions: impl IntoIterator<Item = ApiVersion>) -> Self {
        self.declared.extend(versions);
        self
    }

    pub fn supported(mut self, versions: impl IntoIterator<Item = ApiVersion>) -> Self {
        self.supported.extend(versions);
        self
    }

    pub fn deprecated(mut self, versions: impl IntoIterator<Item = ApiVersion>) -> Self {
        self.deprecated.extend(versions);
        self
    }

    pub fn build(self) -> ApiVersionModel {
        ApiVersionModel::new(self.declared, self.supported, self.deprecated)
    }
}

/// Pairs an API-wide model with one endpoint's model and resolves how
/// versions map onto the endpoint.
#[derive(Clone, Debug)]
pub struct EndpointVersionInfo {
    api_model: ApiVersionModel,
    endpoint_model: ApiVersionModel,
    display_name: Option<String>,
    combined: OnceLock<ApiVersionModel>,
}

impl EndpointVersionInfo {
    pub fn new(api_model: ApiVersionModel, endpoint_model: ApiVersionModel) -> Self {
        Self {
            api_model,
            endpoint_model,
            display_name: None,
            combined: OnceLock::new(),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn api_model(&self) -> &ApiVersionModel {
        &self.api_model
    }

    pub fn endpoint_model(&self) -> &ApiVersionModel {
        &self.endpoint_model
    }

    /// The model governing the requested mapping: the endpoint's own for
    /// explicit, the API's for implicit, and a memoized merge for
    /// combined. `None` resolves to the canonical empty model.
    pub fn resolve(&self, mapping: ApiVersionMapping) -> &ApiVersionModel {
        match mapping {
            ApiVersionMapping::Explicit => &self.endpoint_model,
            ApiVersionMapping::Implicit => &self.api_model,
            ApiVersionMapping::Combined => self.combined(),
            ApiVersionMapping::None => ApiVersionModel::empty(),
        }
    }

    fn combined(&self) -> &ApiVersionModel {
        self.combined.get_or_init(|| {
            if self.api_model.is_neutral() {
                return self.api_model.clone();
            }
            if self.endpoint_model.is_neutral() || !self.endpoint_model.declared().is_empty() {
                return self.endpoint_model.clone();
            }
            // The endpoint declares nothing of its own: keep the API's
            // declared set but the endpoint's support story.
            ApiVersionModel {
                neutral: false,
                declared: self.api_model.declared.clone(),
                implemented: union(&self.endpoint_model.supported, &self.endpoint_model.deprecated),
                supported: self.endpoint_model.supported.clone(),
                deprecated: self.endpoint_model.deprecated.clone(),
            }
        })
    }

    /// Classify how `version` is associated with this endpoint.
    ///
    /// A neutral endpoint always answers `Explicit`, whatever the queried
    /// version; an absent version is `None`; a version both declared and
    /// implemented by the endpoint is `Explicit`; a version declared only
    /// by the API is `Implicit` when the endpoint declares nothing of its
    /// own.
    pub fn mapping_for(&self, version: Option<&ApiVersion>) -> ApiVersionMapping {
        if self.endpoint_model.is_neutral() {
            return ApiVersionMapping::Explicit;
        }
        let Some(version) = version else {
            return ApiVersionMapping::None;
        };
        let endpoint = &self.endpoint_model;
        if endpoint.declares(version) && endpoint.implements(version) {
            ApiVersionMapping::Explicit
        } else if endpoint.declared.is_empty() && self.api_model.declares(version) {
            ApiVersionMapping::Implicit
        } else {
            ApiVersionMapping::None
        }
    }
}

fn normalize(mut versions: Vec<ApiVersion>) -> Vec<ApiVersion> {
    versions.sort();
    versions.dedup();
    versions
}

fn union(a: &[ApiVersion], b: &[ApiVersion]) -> Vec<ApiVersion> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    out.extend_from_slice(a);
    out.extend_from_slice(b);
    normalize(out)
}

fn contains(sorted: &[ApiVersion], version: &ApiVersion) -> bool {
    sorted.binary_search(version).is_ok()
}

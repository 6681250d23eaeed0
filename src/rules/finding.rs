use serde::{Serialize, Serializer};

/// A single normalized observation emitted by a rule.
///
/// The `code` is the durable contract with consumers; categories and paths
/// are descriptive. Free-text messages live in the knowledge base, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub code: FindingCode,
    pub category: Category,
    pub path: String,
}

impl Finding {
    /// Build a finding for `code` at `path`, deriving the category from
    /// the code so the two can never disagree.
    pub fn new(code: FindingCode, path: impl Into<String>) -> Self {
        Self {
            code,
            category: code.category(),
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Security,
    Performance,
    Structure,
    Vulnerability,
    Info,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Security => write!(f, "security"),
            Self::Performance => write!(f, "performance"),
            Self::Structure => write!(f, "structure"),
            Self::Vulnerability => write!(f, "vulnerability"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Every finding code the scanner can emit.
///
/// Spellings are published wire contract: once released they never change.
/// Serialization goes through [`FindingCode::as_str`] so the enum is the
/// single source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FindingCode {
    // Security
    SecurityHeaderMissing,
    SecurityHeaderExposureDetected,
    SecurityCorsMisconfiguration,
    SecurityCorsCredentialsWithWildcardOrigin,
    SecurityCorsDangerousMethodsAllowed,
    SecurityCorsAllowAllHeaders,
    SecurityPassiveRateLimitHeadersNotFound,
    SecurityPassiveRateLimitDisabled,
    SecurityPassiveRateLimitMisconfiguration,
    SecurityPassiveRateLimitEnforced,
    SecurityActiveRateLimitNotDetected,
    // Structure
    StructureStatusCode2xxErrorBody,
    StructureStatusCodePost204WithBody,
    StructureStatusCodeGetUnexpected201,
    StructureStatusCodeGet200EmptyBody,
    StructureStatusCode204WithBody,
    StructureStatusCodeGetUnexpected204,
    StructureStatusCodeHeadUnexpected,
    StructureMethodUsageGetUnsafeVerb,
    StructureMethodUsagePostForSearch,
    StructureMethodUsagePutWithoutId,
    StructureMethodUsageDeleteLargeBody,
    StructureMethodUsagePatchWithoutId,
    StructureMethodUsageGetUnsafeSuffix,
    StructureVersioningMissingInPath,
    StructureVersioningQueryParamDiscouraged,
    StructureFieldCasingInconsistent,
    // Performance
    PerformanceCompressionMissingContentEncodingHeader,
    PerformanceCompressionLargeUncompressedResponse,
    PerformanceLatencyExceededThreshold,
    PerformancePayloadSizeExceedsLimit,
    // Vulnerability
    VulnerabilityStacktraceDetected,
    VulnerabilityStacktraceLanguageSpecific,
}

impl FindingCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SecurityHeaderMissing => "SECURITY_HEADER_MISSING",
            Self::SecurityHeaderExposureDetected => "SECURITY_HEADER_EXPOSURE_DETECTED",
            Self::SecurityCorsMisconfiguration => "SECURITY_CORS_MISCONFIGURATION",
            Self::SecurityCorsCredentialsWithWildcardOrigin => {
                "SECURITY_CORS_CREDENTIALS_WITH_WILDCARD_ORIGIN"
            }
            Self::SecurityCorsDangerousMethodsAllowed => "SECURITY_CORS_DANGEROUS_METHODS_ALLOWED",
            Self::SecurityCorsAllowAllHeaders => "SECURITY_CORS_ALLOW_ALL_HEADERS",
            Self::SecurityPassiveRateLimitHeadersNotFound => {
                "SECURITY_PASSIVE_RATE_LIMIT_HEADERS_NOT_FOUND"
            }
            Self::SecurityPassiveRateLimitDisabled => "SECURITY_PASSIVE_RATE_LIMIT_DISABLED",
            Self::SecurityPassiveRateLimitMisconfiguration => {
                "SECURITY_PASSIVE_RATE_LIMIT_MISCONFIGURATION"
            }
            Self::SecurityPassiveRateLimitEnforced => "SECURITY_PASSIVE_RATE_LIMIT_ENFORCED",
            Self::SecurityActiveRateLimitNotDetected => "SECURITY_ACTIVE_RATE_LIMIT_NOT_DETECTED",
            Self::StructureStatusCode2xxErrorBody => "STRUCTURE_STATUS_CODE_2XX_ERROR_BODY",
            Self::StructureStatusCodePost204WithBody => "STRUCTURE_STATUS_CODE_POST_204_WITH_BODY",
            Self::StructureStatusCodeGetUnexpected201 => {
                "STRUCTURE_STATUS_CODE_GET_UNEXPECTED_201"
            }
            Self::StructureStatusCodeGet200EmptyBody => "STRUCTURE_STATUS_CODE_GET_200_EMPTY_BODY",
            Self::StructureStatusCode204WithBody => "STRUCTURE_STATUS_CODE_204_WITH_BODY",
            Self::StructureStatusCodeGetUnexpected204 => {
                "STRUCTURE_STATUS_CODE_GET_UNEXPECTED_204"
            }
            Self::StructureStatusCodeHeadUnexpected => "STRUCTURE_STATUS_CODE_HEAD_UNEXPECTED",
            Self::StructureMethodUsageGetUnsafeVerb => "STRUCTURE_METHOD_USAGE_GET_UNSAFE_VERB",
            Self::StructureMethodUsagePostForSearch => "STRUCTURE_METHOD_USAGE_POST_FOR_SEARCH",
            Self::StructureMethodUsagePutWithoutId => "STRUCTURE_METHOD_USAGE_PUT_WITHOUT_ID",
            Self::StructureMethodUsageDeleteLargeBody => "STRUCTURE_METHOD_USAGE_DELETE_LARGE_BODY",
            Self::StructureMethodUsagePatchWithoutId => "STRUCTURE_METHOD_USAGE_PATCH_WITHOUT_ID",
            Self::StructureMethodUsageGetUnsafeSuffix => "STRUCTURE_METHOD_USAGE_GET_UNSAFE_SUFFIX",
            Self::StructureVersioningMissingInPath => "STRUCTURE_VERSIONING_MISSING_IN_PATH",
            Self::StructureVersioningQueryParamDiscouraged => {
                "STRUCTURE_VERSIONING_QUERY_PARAM_DISCOURAGED"
            }
            Self::StructureFieldCasingInconsistent => "STRUCTURE_FIELD_CASING_INCONSISTENT",
            Self::PerformanceCompressionMissingContentEncodingHeader => {
                "PERFORMANCE_COMPRESSION_MISSING_CONTENT_ENCODING_HEADER"
            }
            Self::PerformanceCompressionLargeUncompressedResponse => {
                "PERFORMANCE_COMPRESSION_LARGE_UNCOMPRESSED_RESPONSE"
            }
            Self::PerformanceLatencyExceededThreshold => "PERFORMANCE_LATENCY_EXCEEDED_THRESHOLD",
            Self::PerformancePayloadSizeExceedsLimit => "PERFORMANCE_PAYLOAD_SIZE_EXCEEDS_LIMIT",
            Self::VulnerabilityStacktraceDetected => "VULNERABILITY_STACKTRACE_DETECTED",
            Self::VulnerabilityStacktraceLanguageSpecific => {
                "VULNERABILITY_STACKTRACE_LANGUAGE_SPECIFIC"
            }
        }
    }

    /// The category a code reports under. `SECURITY_PASSIVE_RATE_LIMIT_ENFORCED`
    /// is a positive observation and reports as info.
    pub fn category(&self) -> Category {
        match self {
            Self::SecurityPassiveRateLimitEnforced => Category::Info,
            Self::SecurityHeaderMissing
            | Self::SecurityHeaderExposureDetected
            | Self::SecurityCorsMisconfiguration
            | Self::SecurityCorsCredentialsWithWildcardOrigin
            | Self::SecurityCorsDangerousMethodsAllowed
            | Self::SecurityCorsAllowAllHeaders
            | Self::SecurityPassiveRateLimitHeadersNotFound
            | Self::SecurityPassiveRateLimitDisabled
            | Self::SecurityPassiveRateLimitMisconfiguration
            | Self::SecurityActiveRateLimitNotDetected => Category::Security,
            Self::StructureStatusCode2xxErrorBody
            | Self::StructureStatusCodePost204WithBody
            | Self::StructureStatusCodeGetUnexpected201
            | Self::StructureStatusCodeGet200EmptyBody
            | Self::StructureStatusCode204WithBody
            | Self::StructureStatusCodeGetUnexpected204
            | Self::StructureStatusCodeHeadUnexpected
            | Self::StructureMethodUsageGetUnsafeVerb
            | Self::StructureMethodUsagePostForSearch
            | Self::StructureMethodUsagePutWithoutId
            | Self::StructureMethodUsageDeleteLargeBody
            | Self::StructureMethodUsagePatchWithoutId
            | Self::StructureMethodUsageGetUnsafeSuffix
            | Self::StructureVersioningMissingInPath
            | Self::StructureVersioningQueryParamDiscouraged
            | Self::StructureFieldCasingInconsistent => Category::Structure,
            Self::PerformanceCompressionMissingContentEncodingHeader
            | Self::PerformanceCompressionLargeUncompressedResponse
            | Self::PerformanceLatencyExceededThreshold
            | Self::PerformancePayloadSizeExceedsLimit => Category::Performance,
            Self::VulnerabilityStacktraceDetected
            | Self::VulnerabilityStacktraceLanguageSpecific => Category::Vulnerability,
        }
    }
}

impl std::fmt::Display for FindingCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for FindingCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

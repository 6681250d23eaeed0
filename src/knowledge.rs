//! Finding-code to remediation-guidance lookup.
//!
//! Keyed by exact code equality over the closed [`FindingCode`] enum, so a
//! longer code can never silently match an entry registered for a shorter
//! one. Total by construction: every code has an entry.

use serde::Serialize;

use crate::rules::FindingCode;

/// Remediation guidance paired with a finding at report time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Enrichment {
    pub description: String,
    pub recommendation: String,
    pub references: Vec<String>,
}

impl Enrichment {
    fn new(description: &str, recommendation: &str, references: &[&str]) -> Self {
        Self {
            description: description.to_owned(),
            recommendation: recommendation.to_owned(),
            references: references.iter().map(|r| (*r).to_owned()).collect(),
        }
    }
}

/// Look up the enrichment for a finding code.
pub fn enrich(code: FindingCode) -> Enrichment {
    use FindingCode::*;
    match code {
        SecurityHeaderMissing => Enrichment::new(
            "A required security header is missing. These headers help protect against common vulnerabilities such as clickjacking, MIME-type sniffing, and XSS.",
            "Ensure headers like 'Strict-Transport-Security', 'X-Content-Type-Options', 'X-Frame-Options', 'X-XSS-Protection', and 'Referrer-Policy' are included in responses.",
            &[
                "https://owasp.org/www-project-secure-headers/",
                "https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers",
            ],
        ),
        SecurityHeaderExposureDetected => Enrichment::new(
            "Response includes headers that may reveal server technologies, versions, or internal infrastructure — useful for attackers.",
            "Remove or mask sensitive headers such as 'Server', 'X-Powered-By', and 'X-Backend-Server' in production environments.",
            &[
                "https://owasp.org/www-project-secure-headers/",
                "https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Server",
            ],
        ),
        SecurityCorsMisconfiguration => Enrichment::new(
            "The 'Access-Control-Allow-Origin' header is set to '*', allowing any domain to access the resource.",
            "Restrict 'Access-Control-Allow-Origin' to trusted domains only.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/CORS"],
        ),
        SecurityCorsCredentialsWithWildcardOrigin => Enrichment::new(
            "'Access-Control-Allow-Credentials' is true while origin is '*', which is invalid per the CORS spec and creates security risks.",
            "Use specific origins instead of '*', or disable credentials if open access is required.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Access-Control-Allow-Credentials"],
        ),
        SecurityCorsDangerousMethodsAllowed => Enrichment::new(
            "CORS configuration allows dangerous HTTP methods like 'DELETE' or wildcard '*', which may enable cross-origin abuse.",
            "Restrict 'Access-Control-Allow-Methods' to safe methods such as 'GET' and 'POST'.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Access-Control-Allow-Methods"],
        ),
        SecurityCorsAllowAllHeaders => Enrichment::new(
            "The 'Access-Control-Allow-Headers' header includes '*', potentially exposing sensitive data to cross-origin requests.",
            "Explicitly list only the necessary headers in 'Access-Control-Allow-Headers'.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Access-Control-Allow-Headers"],
        ),
        SecurityPassiveRateLimitHeadersNotFound => Enrichment::new(
            "No rate-limiting headers were found in the response, making it unclear whether abuse protection is in place.",
            "Add standard rate-limiting headers such as 'X-RateLimit-Limit' and 'Retry-After' to inform clients and improve security.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Retry-After"],
        ),
        SecurityPassiveRateLimitDisabled => Enrichment::new(
            "Rate limiting appears to be disabled as 'X-RateLimit-Limit' is set to 0.",
            "Set a reasonable rate limit to prevent abuse and protect backend resources.",
            &["https://cheatsheetseries.owasp.org/cheatsheets/Rate_Limiting_Cheat_Sheet.html"],
        ),
        SecurityPassiveRateLimitMisconfiguration => Enrichment::new(
            "'X-RateLimit-Remaining' is greater than 'X-RateLimit-Limit', indicating a possible configuration error.",
            "Ensure rate-limiting headers are calculated and returned consistently by the API gateway or backend.",
            &["https://tools.ietf.org/id/draft-polli-ratelimit-headers-03.html"],
        ),
        SecurityPassiveRateLimitEnforced => Enrichment::new(
            "The endpoint answered 429 Too Many Requests, so rate limiting appears to be enforced.",
            "No action needed. Confirm limits and Retry-After values match your service expectations.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/429"],
        ),
        SecurityActiveRateLimitNotDetected => Enrichment::new(
            "No rate limiting was observed — the API responded normally to multiple rapid requests.",
            "Implement rate limiting to prevent abuse and reduce attack surface.",
            &["https://developer.mozilla.org/en-US/docs/Glossary/Rate_limit"],
        ),
        StructureStatusCode2xxErrorBody => Enrichment::new(
            "Response returned with 2xx status code but contains error-like fields in the JSON body.",
            "Ensure error responses use appropriate non-2xx status codes and proper error structures in the body.",
            &["https://restfulapi.net/http-status-codes/"],
        ),
        StructureStatusCodePost204WithBody => Enrichment::new(
            "POST requests returning 204 No Content should not include a response body.",
            "Avoid sending a response body with a 204 status code, following HTTP specifications.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/204"],
        ),
        StructureStatusCodeGetUnexpected201 => Enrichment::new(
            "GET requests should not return 201 Created status code.",
            "Use 201 status code only for successful resource creation requests (typically POST).",
            &["https://restfulapi.net/http-methods/#post"],
        ),
        StructureStatusCodeGet200EmptyBody => Enrichment::new(
            "GET requests returned 200 OK but the response body is empty.",
            "Ensure GET requests with 200 status return a valid response body or use 204 No Content if empty.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/204"],
        ),
        StructureStatusCode204WithBody => Enrichment::new(
            "204 No Content responses should not include a response body.",
            "Remove any body content from 204 responses as per HTTP spec.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/Status/204"],
        ),
        StructureStatusCodeGetUnexpected204 => Enrichment::new(
            "GET requests returned 204 No Content, which is unexpected.",
            "Avoid returning 204 for GET requests; use 200 with empty body if appropriate.",
            &["https://restfulapi.net/http-status-codes/"],
        ),
        StructureStatusCodeHeadUnexpected => Enrichment::new(
            "HEAD requests should only return 200 OK or 204 No Content status codes.",
            "Ensure HEAD responses use only 200 or 204 status codes.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/Methods/HEAD"],
        ),
        StructureMethodUsageGetUnsafeVerb => Enrichment::new(
            "GET requests should be safe and not modify server state. Using action verbs like delete or update in GET URLs may cause side effects.",
            "Avoid using GET for operations that modify data. Use POST, PUT, PATCH, or DELETE accordingly.",
            &["https://restfulapi.net/http-methods/#safe-and-idempotent-methods"],
        ),
        StructureMethodUsagePostForSearch => Enrichment::new(
            "POST method is used for searching, which semantically should be a GET request.",
            "Use GET for search operations to improve caching and adherence to REST conventions.",
            &["https://restfulapi.net/resource-naming/"],
        ),
        StructureMethodUsagePutWithoutId => Enrichment::new(
            "PUT requests without resource ID usually indicate misuse as PUT is intended to update a specific resource.",
            "Use POST for creation or PATCH for partial updates without explicit ID in URL.",
            &["https://restfulapi.net/resource-naming/"],
        ),
        StructureMethodUsageDeleteLargeBody => Enrichment::new(
            "DELETE requests returning large response bodies are unusual and may indicate unnecessary data transfer.",
            "Keep DELETE responses minimal, preferably no body or only essential confirmation.",
            &["https://restfulapi.net/http-methods/#delete"],
        ),
        StructureMethodUsagePatchWithoutId => Enrichment::new(
            "PATCH requests generally require a resource ID to apply partial updates.",
            "Ensure PATCH requests include the resource identifier in the URL.",
            &["https://restfulapi.net/http-methods/#patch"],
        ),
        StructureMethodUsageGetUnsafeSuffix => Enrichment::new(
            "GET requests with URL suffixes like /delete or /update are unsafe and may modify state unexpectedly.",
            "Avoid encoding state-changing actions in GET request paths.",
            &["https://restfulapi.net/http-methods/#safe-and-idempotent-methods"],
        ),
        StructureVersioningMissingInPath => Enrichment::new(
            "API routes without versioning in the path make it difficult to evolve the API without breaking existing clients.",
            "Include the API version in the URL path (e.g., /v1/resource) to support backward compatibility.",
            &["https://restfulapi.net/versioning/"],
        ),
        StructureVersioningQueryParamDiscouraged => Enrichment::new(
            "Using query parameters for versioning is less preferred and can lead to caching issues and inconsistent API behavior.",
            "Prefer versioning via the URL path instead of query parameters.",
            &["https://restfulapi.net/versioning/"],
        ),
        StructureFieldCasingInconsistent => Enrichment::new(
            "The JSON response uses multiple field naming conventions (e.g., camelCase, snake_case, PascalCase), which can confuse clients and reduce maintainability.",
            "Adopt a consistent naming convention for all fields in API responses (preferably camelCase or snake_case).",
            &["https://dev.to/imichaelowolabi/what-case-should-your-api-request-response-be-ggo"],
        ),
        PerformanceCompressionMissingContentEncodingHeader => Enrichment::new(
            "The 'Content-Encoding' header is missing — response is likely uncompressed.",
            "Add the 'Content-Encoding' header and enable compression on the server.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Content-Encoding"],
        ),
        PerformanceCompressionLargeUncompressedResponse => Enrichment::new(
            "Large responses without compression increase bandwidth usage and page load time.",
            "Enable gzip, br, or deflate compression for responses larger than 1KB.",
            &["https://developer.mozilla.org/en-US/docs/Web/HTTP/Headers/Content-Encoding"],
        ),
        PerformanceLatencyExceededThreshold => Enrichment::new(
            "The response time exceeded the acceptable latency threshold, which can degrade user experience.",
            "Optimize backend performance, cache frequent responses, or analyze slow dependencies.",
            &[
                "https://developer.mozilla.org/en-US/docs/Web/Performance",
                "https://web.dev/time-to-first-byte/",
            ],
        ),
        PerformancePayloadSizeExceedsLimit => Enrichment::new(
            "The response payload size is larger than expected, which can slow down clients or mobile devices.",
            "Reduce payload size by removing unnecessary fields, paginating large datasets, or optimizing binary data.",
            &[
                "https://web.dev/optimize-lcp/",
                "https://developers.google.com/web/fundamentals/performance/optimizing-content-efficiency/",
            ],
        ),
        VulnerabilityStacktraceDetected => Enrichment::new(
            "A stacktrace was found in the response body, indicating a server-side error leaking internal details.",
            "Disable stacktrace exposure in production and return generic error messages instead.",
            &["https://owasp.org/www-community/Improper_Error_Handling"],
        ),
        VulnerabilityStacktraceLanguageSpecific => Enrichment::new(
            "The response body contains stacktrace patterns specific to languages like Java, Python, Node.js, Ruby, or PHP.",
            "Sanitize all error messages and configure the application to hide implementation details in production.",
            &["https://owasp.org/www-community/Improper_Error_Handling"],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin;

    #[test]
    fn lookup_is_total_over_every_emittable_code() {
        for rule in builtin::catalog() {
            for &code in rule.codes() {
                let entry = enrich(code);
                assert!(
                    !entry.description.is_empty(),
                    "empty description for {code}"
                );
                assert!(
                    !entry.recommendation.is_empty(),
                    "empty recommendation for {code}"
                );
                assert!(
                    entry.references.iter().all(|r| r.starts_with("https://")),
                    "bad reference for {code}"
                );
            }
        }
    }

    #[test]
    fn similarly_prefixed_codes_resolve_independently() {
        // CORS misconfiguration is a prefix-sibling of the
        // credentials-with-wildcard code; exact matching keeps them apart.
        let a = enrich(FindingCode::SecurityCorsMisconfiguration);
        let b = enrich(FindingCode::SecurityCorsCredentialsWithWildcardOrigin);
        assert_ne!(a, b);

        let a = enrich(FindingCode::SecurityPassiveRateLimitDisabled);
        let b = enrich(FindingCode::SecurityPassiveRateLimitMisconfiguration);
        assert_ne!(a, b);
    }
}

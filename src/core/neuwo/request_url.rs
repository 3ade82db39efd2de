use crate::core::fragments::deep_get;
use crate::core::models::{BidRequestConfig, RefererInfo};
use crate::core::neuwo::ValidatedParams;

/// Picks the page url to classify, in order: the `argUrl` override, the
/// host detected page, then `site.page` of the global first party data.
/// Falls back to an empty string when none is known.
pub fn resolve_page_url(
    params: &ValidatedParams,
    referer: &RefererInfo,
    request: &BidRequestConfig,
) -> String {
    params
        .arg_url
        .clone()
        .or_else(|| referer.page.clone().filter(|p| !p.is_empty()))
        .or_else(|| {
            deep_get(&request.ortb2_fragments.global, &["site", "page"])
                .and_then(|p| p.as_str())
                .map(str::to_string)
        })
        .unwrap_or_default()
}

/// Builds the classification url by appending the token and the
/// percent encoded page url to `apiUrl`. Uses `&` as joiner when the
/// api url already carries a query string, `?` otherwise.
pub fn build_request_url(params: &ValidatedParams, page_url: &str) -> String {
    let joiner = if params.api_url.contains('?') { '&' } else { '?' };

    format!(
        "{}{}token={}&url={}",
        params.api_url,
        joiner,
        params.public_token,
        urlencoding::encode(page_url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(api_url: &str, arg_url: Option<&str>) -> ValidatedParams {
        ValidatedParams {
            public_token: "T".to_string(),
            api_url: api_url.to_string(),
            arg_url: arg_url.map(str::to_string),
        }
    }

    #[test]
    fn test_build_request_url_question_joiner() {
        assert_eq!(
            build_request_url(&params("https://x/y", None), "https://p/q?a=1"),
            "https://x/y?token=T&url=https%3A%2F%2Fp%2Fq%3Fa%3D1"
        );
    }

    #[test]
    fn test_build_request_url_ampersand_joiner() {
        assert_eq!(
            build_request_url(&params("https://x/y?pre=test", None), "https://p/q?a=1"),
            "https://x/y?pre=test&token=T&url=https%3A%2F%2Fp%2Fq%3Fa%3D1"
        );
    }

    #[test]
    fn test_resolve_prefers_arg_url() {
        let referer = RefererInfo::new("https://detected/page");
        let request = BidRequestConfig::default();

        assert_eq!(
            resolve_page_url(&params("https://x/y", Some("https://override")), &referer, &request),
            "https://override"
        );
        assert_eq!(
            resolve_page_url(&params("https://x/y", None), &referer, &request),
            "https://detected/page"
        );
    }

    #[test]
    fn test_resolve_falls_back_to_site_page() {
        let mut request = BidRequestConfig::default();
        request.merge_global(json!({"site": {"page": "https://site/page"}}));

        assert_eq!(
            resolve_page_url(&params("https://x/y", None), &RefererInfo::default(), &request),
            "https://site/page"
        );
        assert_eq!(
            resolve_page_url(
                &params("https://x/y", None),
                &RefererInfo::default(),
                &BidRequestConfig::default()
            ),
            ""
        );
    }
}

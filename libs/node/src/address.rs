use anyhow::{Context, Result};
use reqwest::Url;

/// Read a canister id from a query parameter of a page URL
///
/// Returns `None` when the parameter is absent or blank.
pub fn from_page_url(url: &str, param: &str) -> Result<Option<String>> {
    let url = Url::parse(url).with_context(|| format!("invalid page URL {url:?}"))?;
    Ok(url
        .query_pairs()
        .find(|(key, _)| key == param)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_canister_id_param() {
        let id = from_page_url(
            "http://localhost:8080/?canisterId=rkp4c-7iaaa-aaaaa-aaaca-cai&x=1",
            "canisterId",
        )
        .unwrap();
        assert_eq!(id.as_deref(), Some("rkp4c-7iaaa-aaaaa-aaaca-cai"));
    }

    #[test]
    fn missing_or_blank_param_is_none() {
        assert_eq!(from_page_url("http://localhost/?other=1", "canisterId").unwrap(), None);
        assert_eq!(from_page_url("http://localhost/?canisterId=", "canisterId").unwrap(), None);
    }

    #[test]
    fn rejects_unparseable_url() {
        assert!(from_page_url("not a url", "canisterId").is_err());
    }
}

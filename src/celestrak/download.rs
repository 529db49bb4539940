use std::future::Future;

use reqwest::{Client, RequestBuilder};

use crate::celestrak::error::DatasetError;

/// Fetches the raw body of a GET request to `base_url` with `query` parameters.
pub trait Download {
    fn get(
        &self,
        base_url: &str,
        query: &[(&str, &str)],
    ) -> impl Future<Output = Result<Vec<u8>, DatasetError>> + Send;
}

#[derive(Clone, Default)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    fn request(&self, base_url: &str, query: &[(&str, &str)]) -> RequestBuilder {
        self.client.get(base_url).query(query)
    }
}

impl Download for HttpDownloader {
    async fn get(&self, base_url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>, DatasetError> {
        let response = self.request(base_url, query).send().await?;
        log::debug!("GET {} -> {}", response.url(), response.status());

        if !response.status().is_success() {
            return Err(DatasetError::Status {
                url: response.url().to_string(),
                status: response.status().as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_values_are_encoded_by_the_client() {
        let request = HttpDownloader::new()
            .request(
                "https://celestrak.org/NORAD/elements/gp.php",
                &[("NAME", "ISS (ZARYA)"), ("FORMAT", "CSV")],
            )
            .build()
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "https://celestrak.org/NORAD/elements/gp.php?NAME=ISS+%28ZARYA%29&FORMAT=CSV"
        );
        let (key, value) = request.url().query_pairs().next().unwrap();
        assert_eq!((key.as_ref(), value.as_ref()), ("NAME", "ISS (ZARYA)"));
    }
}

use crate::api::ContactApi;
use crate::{CrmError, Result};
use dedupe_core::{ContactId, PropertyBag, SearchQuery};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpOptions {
    pub base_url: String,
    pub access_token: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub user_agent: Option<String>,
}

#[cfg(feature = "http-client")]
mod imp {
    use super::{ContactApi, ContactId, CrmError, HttpOptions, PropertyBag, Result, SearchQuery};
    use crate::wire;
    use reqwest::blocking::{Client, RequestBuilder};
    use url::Url;

    const CONTACTS_PATH: &str = "crm/v3/objects/contacts";
    const SEARCH_PATH: &str = "crm/v3/objects/contacts/search";
    const MERGE_PATH: &str = "contacts/v1/contact/merge-vids";

    #[derive(Debug, Clone)]
    pub struct HttpContactApi {
        base_url: String,
        access_token: String,
        client: Client,
    }

    impl HttpContactApi {
        pub fn new(options: HttpOptions) -> Result<Self> {
            let base = Url::parse(&options.base_url)?;
            if base.scheme() != "https" {
                return Err(CrmError::Unavailable("crm base url must use https".to_string()));
            }
            let client = Client::builder()
                .user_agent(options.user_agent.as_deref().unwrap_or("dedupe"))
                .timeout(options.timeout)
                .connect_timeout(options.connect_timeout)
                .build()?;
            Ok(Self {
                base_url: options.base_url.trim_end_matches('/').to_string(),
                access_token: options.access_token,
                client,
            })
        }

        fn endpoint(&self, path: &str) -> Result<Url> {
            Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
        }

        fn send(&self, request: RequestBuilder) -> Result<String> {
            let response = request
                .bearer_auth(&self.access_token)
                .header("Accept", "application/json")
                .send()?;
            let status = response.status();
            let body = response.text()?;
            if !status.is_success() {
                return Err(CrmError::Status {
                    status: status.as_u16(),
                    body,
                });
            }
            Ok(body)
        }
    }

    impl ContactApi for HttpContactApi {
        fn fetch_contact(
            &self,
            id: ContactId,
            properties: &[&str],
        ) -> Result<Option<PropertyBag>> {
            let mut url = self.endpoint(&format!("{CONTACTS_PATH}/{id}"))?;
            url.query_pairs_mut().append_pair("properties", &properties.join(","));
            let body = self.send(self.client.get(url))?;
            wire::parse_contact_response(&body)
        }

        fn search_contacts(&self, query: &SearchQuery) -> Result<Vec<ContactId>> {
            let url = self.endpoint(SEARCH_PATH)?;
            let payload = serde_json::to_string(query)?;
            let body = self.send(
                self.client
                    .post(url)
                    .header("Content-Type", "application/json")
                    .body(payload),
            )?;
            wire::parse_search_response(&body)
        }

        fn merge_contacts(&self, target: ContactId, merged: ContactId) -> Result<()> {
            let url = self.endpoint(&format!("{MERGE_PATH}/{target}"))?;
            let payload = wire::merge_request_body(merged)?;
            self.send(
                self.client
                    .post(url)
                    .header("Content-Type", "application/json")
                    .body(payload),
            )?;
            Ok(())
        }
    }

}

#[cfg(not(feature = "http-client"))]
mod imp {
    use super::{ContactApi, ContactId, CrmError, HttpOptions, PropertyBag, Result, SearchQuery};

    #[derive(Debug, Clone)]
    pub struct HttpContactApi {
        base_url: String,
    }

    impl HttpContactApi {
        pub fn new(options: HttpOptions) -> Result<Self> {
            Ok(Self {
                base_url: options.base_url,
            })
        }

        fn unavailable(&self) -> CrmError {
            CrmError::Unavailable(format!(
                "cannot reach {}: CRM access requires the http-client feature",
                self.base_url
            ))
        }
    }

    impl ContactApi for HttpContactApi {
        fn fetch_contact(
            &self,
            _id: ContactId,
            _properties: &[&str],
        ) -> Result<Option<PropertyBag>> {
            Err(self.unavailable())
        }

        fn search_contacts(&self, _query: &SearchQuery) -> Result<Vec<ContactId>> {
            Err(self.unavailable())
        }

        fn merge_contacts(&self, _target: ContactId, _merged: ContactId) -> Result<()> {
            Err(self.unavailable())
        }
    }

}

pub use imp::HttpContactApi;

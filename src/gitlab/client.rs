use crate::error::{ReportError, Result};
use crate::observer::Observer;
use log::Level;
use serde::de::DeserializeOwned;
use std::time::Duration;

pub const PER_PAGE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// A single authenticated GET. Anything that is not a response is an error.
pub trait Transport {
    fn get(&self, url: &str, token: &str) -> Result<HttpResponse>;
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// `None` disables the request timeout altogether.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for ReqwestTransport {
    fn get(&self, url: &str, token: &str) -> Result<HttpResponse> {
        let response = self.client.get(url).header("PRIVATE-TOKEN", token).send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

/// What to do when a page cannot be fetched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the failure and stop paginating, keeping what was collected.
    #[default]
    Truncate,
    /// Fail the whole call.
    Strict,
}

pub struct GitLabClient<T = ReqwestTransport> {
    transport: T,
    base_url: String,
    token: String,
    policy: ErrorPolicy,
}

impl<T: Transport> GitLabClient<T> {
    pub fn new(transport: T, base_url: &str, token: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            policy: ErrorPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub(crate) fn endpoint(&self, path_and_query: &str) -> String {
        format!("{}/api/v4/{}", self.base_url, path_and_query)
    }

    /// Request pages 1, 2, ... until one comes back empty.
    ///
    /// `noun` names the items in log lines, `what` names the resource in
    /// failure messages. `keep` may drop items from a page; it never ends
    /// pagination early.
    pub(crate) fn paginate<V, U, K>(
        &self,
        noun: &str,
        what: &str,
        url_for_page: U,
        observer: &dyn Observer,
        mut keep: K,
    ) -> Result<Vec<V>>
    where
        V: DeserializeOwned,
        U: Fn(u32) -> String,
        K: FnMut(Vec<V>) -> Vec<V>,
    {
        let mut items = Vec::new();
        let mut page = 1;

        loop {
            let url = url_for_page(page);
            observer.log(Level::Debug, &format!("Requesting {noun} from: {url}"));

            let data: Vec<V> = match self.fetch_page(&url, what) {
                Ok(data) => data,
                Err(error) => {
                    self.give_up(what, error, observer)?;
                    break;
                }
            };

            if data.is_empty() {
                observer.log(Level::Debug, &format!("No more {noun} found."));
                break;
            }

            let kept = keep(data);
            observer.log(Level::Debug, &format!("Fetched {} {noun}.", kept.len()));
            items.extend(kept);
            page += 1;
        }

        Ok(items)
    }

    fn fetch_page<V: DeserializeOwned>(&self, url: &str, what: &str) -> Result<Vec<V>> {
        let response = self.transport.get(url, &self.token)?;
        if response.status != 200 {
            return Err(ReportError::Status {
                resource: what.to_string(),
                status: response.status,
                body: response.body,
            });
        }
        Ok(serde_json::from_str(&response.body)?)
    }

    fn give_up(&self, what: &str, error: ReportError, observer: &dyn Observer) -> Result<()> {
        match self.policy {
            ErrorPolicy::Strict => Err(error),
            ErrorPolicy::Truncate => {
                let detail = match &error {
                    ReportError::Status { body, .. } => body.clone(),
                    other => other.to_string(),
                };
                observer.log(Level::Error, &format!("Error fetching {what}: {detail}"));
                Ok(())
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{HttpResponse, Transport};
    use crate::error::{ReportError, Result};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    pub enum Reply {
        Ok(u16, String),
        Broken,
    }

    /// Serves canned replies per URL prefix; an unscripted request gets `[]`.
    #[derive(Default)]
    pub struct ScriptedTransport {
        routes: RefCell<Vec<(String, VecDeque<Reply>)>>,
        pub requests: RefCell<Vec<(String, String)>>,
    }

    impl ScriptedTransport {
        pub fn route(self, prefix: &str, replies: Vec<Reply>) -> Self {
            self.routes
                .borrow_mut()
                .push((prefix.to_string(), replies.into_iter().collect()));
            self
        }

        pub fn urls(&self) -> Vec<String> {
            self.requests.borrow().iter().map(|(url, _)| url.clone()).collect()
        }
    }

    impl Transport for ScriptedTransport {
        fn get(&self, url: &str, token: &str) -> Result<HttpResponse> {
            self.requests
                .borrow_mut()
                .push((url.to_string(), token.to_string()));
            let mut routes = self.routes.borrow_mut();
            let reply = routes
                .iter_mut()
                .find(|(prefix, _)| url.starts_with(prefix.as_str()))
                .and_then(|(_, replies)| replies.pop_front());
            match reply {
                Some(Reply::Ok(status, body)) => Ok(HttpResponse { status, body }),
                Some(Reply::Broken) => Err(ReportError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection reset by peer",
                ))),
                None => Ok(HttpResponse {
                    status: 200,
                    body: "[]".to_string(),
                }),
            }
        }
    }

    pub fn json(body: serde_json::Value) -> Reply {
        Reply::Ok(200, body.to_string())
    }
}

use reqwest::header::AUTHORIZATION;
use reqwest::multipart::Form;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use common::types::{CreatedResponse, Paged};

use crate::error::{ClientError, HttpResponseError};

/// Generic CRUD client over the entity endpoints.
///
/// One instance serves any number of sessions: the bearer token is passed
/// per call instead of being baked into shared default headers.
#[derive(Debug, Clone, Default)]
pub struct CrudClient {
    http: Client,
}

impl CrudClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an externally configured `reqwest::Client` (timeouts,
    /// proxies).
    pub fn with_http(http: Client) -> Self {
        Self { http }
    }

    fn authorize(req: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        match token {
            Some(token) => req.header(AUTHORIZATION, token),
            None => req,
        }
    }

    /// Send, then turn any non-2xx status into [`HttpResponseError`] with
    /// the body preserved verbatim.
    async fn dispatch(req: RequestBuilder) -> Result<Response, ClientError> {
        let resp = req.send().await?;
        if resp.status().is_success() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(HttpResponseError { status, body }.into())
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        url: &str,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        let resp = Self::dispatch(Self::authorize(self.http.get(url), token)).await?;
        Ok(resp.json().await?)
    }

    /// Fetch one page of a listing. `query` carries extra parameters
    /// (`pageSize`, filters) appended after `pageNumber`; values are
    /// percent-encoded, so callers can pass them through verbatim.
    pub async fn get_all_paginated<T: DeserializeOwned>(
        &self,
        page: i32,
        base_url: &str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> Result<Paged<T>, ClientError> {
        let req = self
            .http
            .get(base_url)
            .query(&[("pageNumber", page)])
            .query(query);
        let resp = Self::dispatch(Self::authorize(req, token)).await?;
        Ok(resp.json().await?)
    }

    pub async fn create<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<CreatedResponse, ClientError> {
        let resp = Self::dispatch(Self::authorize(self.http.post(url).json(body), token)).await?;
        Ok(resp.json().await?)
    }

    pub async fn update<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<(), ClientError> {
        Self::dispatch(Self::authorize(self.http.put(url).json(body), token)).await?;
        Ok(())
    }

    pub async fn create_multipart(
        &self,
        url: &str,
        form: Form,
        token: Option<&str>,
    ) -> Result<CreatedResponse, ClientError> {
        let resp =
            Self::dispatch(Self::authorize(self.http.post(url).multipart(form), token)).await?;
        Ok(resp.json().await?)
    }

    pub async fn update_multipart(
        &self,
        url: &str,
        form: Form,
        token: Option<&str>,
    ) -> Result<(), ClientError> {
        Self::dispatch(Self::authorize(self.http.put(url).multipart(form), token)).await?;
        Ok(())
    }

    pub async fn delete(&self, url: &str, token: Option<&str>) -> Result<(), ClientError> {
        Self::dispatch(Self::authorize(self.http.delete(url), token)).await?;
        Ok(())
    }
}

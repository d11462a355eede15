use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client;
use axum::body::Body;
use tokio_util::io::ReaderStream;

use crate::config::Config;
use crate::storage::{ObjectStore, StorageError};

/// S3-compatible bucket. Works against GCS through its interoperability
/// endpoint when `S3_ENDPOINT` is set.
#[derive(Clone)]
pub struct S3Client {
    client: Client,
    bucket: String,
}

fn upstream<E: std::error::Error>(e: E) -> StorageError {
    StorageError(DisplayErrorContext(e).to_string())
}

impl S3Client {
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            client: Client::from_conf(builder.build()),
            bucket: config.bucket.clone(),
        }
    }
}

impl ObjectStore for S3Client {
    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .into_paginator()
            .send();

        let mut keys = Vec::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(upstream)?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key())
                    .map(str::to_string),
            );
        }
        tracing::debug!("listed {} keys under {prefix}", keys.len());
        Ok(keys)
    }

    async fn exists(&self, key: &str) -> Result<bool, StorageError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(err) if err.as_service_error().is_some_and(|e| e.is_not_found()) => Ok(false),
            Err(err) => Err(upstream(err)),
        }
    }

    async fn stream(&self, key: &str) -> Result<Body, StorageError> {
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(upstream)?;
        Ok(Body::from_stream(ReaderStream::new(
            resp.body.into_async_read(),
        )))
    }
}

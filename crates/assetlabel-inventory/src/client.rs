// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Blocking NetBox client.
//
// Requests are made one page at a time, following the `next` link until the
// API reports the last page. There is no retry: a failed page ends the walk.

use std::collections::HashSet;

use assetlabel_core::config::InventoryConfig;
use assetlabel_core::error::{LabelError, Result};
use assetlabel_core::Device;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue};
use tracing::{debug, error, info, instrument};

use crate::wire::DevicePage;

/// Anything that can produce the devices to label.
pub trait DeviceSource {
    /// Fetch every labelable device.
    ///
    /// Failures are logged and reported as an empty list, which callers treat
    /// as "nothing to do".
    fn fetch_devices(&self) -> Vec<Device>;
}

/// Client for `GET <base>/api/dcim/devices/`.
pub struct InventoryClient {
    http: reqwest::blocking::Client,
    base_url: String,
    page_size: Option<u32>,
}

impl InventoryClient {
    /// Build a client with the token and `Accept` headers preset.
    pub fn new(config: &InventoryConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let token = HeaderValue::from_str(&format!("Token {}", config.token))
            .map_err(|e| LabelError::Config(format!("API token is not a valid header: {e}")))?;
        headers.insert(AUTHORIZATION, token);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::blocking::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| LabelError::Inventory(format!("cannot build HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        })
    }

    /// URL of the first page.
    pub fn devices_url(&self) -> String {
        let url = format!("{}/api/dcim/devices/", self.base_url);
        match self.page_size {
            Some(limit) => format!("{url}?limit={limit}"),
            None => url,
        }
    }

    /// Walk every page, returning the non-VM devices or the first failure.
    #[instrument(skip(self), fields(base = %self.base_url))]
    pub fn try_fetch_devices(&self) -> Result<Vec<Device>> {
        paginate(self.devices_url(), |url| self.fetch_page(url))
    }

    fn fetch_page(&self, url: &str) -> Result<DevicePage> {
        debug!(url, "requesting device page");
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| LabelError::Inventory(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LabelError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<DevicePage>()
            .map_err(|e| LabelError::Inventory(format!("invalid device page from {url}: {e}")))
    }
}

impl DeviceSource for InventoryClient {
    fn fetch_devices(&self) -> Vec<Device> {
        match self.try_fetch_devices() {
            Ok(devices) => devices,
            Err(LabelError::HttpStatus { status, body }) => {
                error!(status, body = %body, "inventory API rejected the request");
                Vec::new()
            }
            Err(err) => {
                error!(error = %err, "inventory fetch failed");
                Vec::new()
            }
        }
    }
}

/// Follow `next` links from `first_url`, collecting every non-VM device.
///
/// `fetch_page` performs the request for one URL. A page that links back to
/// an already visited URL is rejected rather than looping forever.
pub fn paginate<F>(first_url: String, mut fetch_page: F) -> Result<Vec<Device>>
where
    F: FnMut(&str) -> Result<DevicePage>,
{
    let mut devices = Vec::new();
    let mut visited = HashSet::new();
    let mut skipped = 0usize;
    let mut next = Some(first_url);

    while let Some(url) = next.take() {
        if !visited.insert(url.clone()) {
            return Err(LabelError::Inventory(format!(
                "pagination loops back to {url}"
            )));
        }

        let page = fetch_page(&url)?;
        for raw in page.results {
            if raw.is_virtual_machine() {
                debug!(device_id = raw.id, "skipping virtual machine");
                skipped += 1;
                continue;
            }
            devices.push(raw.into_device());
        }
        next = page.next.filter(|link| !link.is_empty());
    }

    info!(
        devices = devices.len(),
        skipped_vms = skipped,
        pages = visited.len(),
        "device inventory fetched"
    );
    Ok(devices)
}

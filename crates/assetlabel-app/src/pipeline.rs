// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fetch, render, print. One device at a time, in inventory order.

use assetlabel_inventory::DeviceSource;
use assetlabel_print::{PrintBackend, PrintDispatcher, PrintReport};
use assetlabel_render::{LabelRenderer, RenderedLabel};
use tracing::{error, info, warn};

/// What one run did.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Devices returned by the inventory.
    pub devices: usize,
    pub rendered: Vec<RenderedLabel>,
    pub render_failures: usize,
    /// `None` when printing was disabled or there was nothing to print.
    pub print: Option<PrintReport>,
}

pub struct Pipeline<S, B> {
    source: S,
    renderer: LabelRenderer,
    dispatcher: Option<PrintDispatcher<B>>,
}

impl<S: DeviceSource, B: PrintBackend> Pipeline<S, B> {
    /// Pass `None` as the dispatcher to render without printing.
    pub fn new(source: S, renderer: LabelRenderer, dispatcher: Option<PrintDispatcher<B>>) -> Self {
        Self {
            source,
            renderer,
            dispatcher,
        }
    }

    pub fn run(&mut self) -> RunSummary {
        let devices = self.source.fetch_devices();
        if devices.is_empty() {
            info!("No devices found");
            return RunSummary::default();
        }

        let mut summary = RunSummary {
            devices: devices.len(),
            ..RunSummary::default()
        };
        for device in &devices {
            match self.renderer.render(device) {
                Ok(label) => summary.rendered.push(label),
                Err(err) => {
                    error!(device_id = %device.id, error = %err, "could not render label");
                    summary.render_failures += 1;
                }
            }
        }

        match &self.dispatcher {
            Some(_) if summary.rendered.is_empty() => {
                warn!("no label rendered, nothing to print");
            }
            Some(dispatcher) => {
                let files: Vec<_> = summary.rendered.iter().map(|label| &label.path).collect();
                summary.print = Some(dispatcher.dispatch(&files));
            }
            None => info!(labels = summary.rendered.len(), "printing disabled"),
        }

        info!(
            devices = summary.devices,
            rendered = summary.rendered.len(),
            render_failures = summary.render_failures,
            "run finished"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetlabel_core::error::{LabelError, Result};
    use assetlabel_core::{AppConfig, Device, InventoryConfig, LabelConfig};
    use assetlabel_inventory::InventoryClient;
    use std::cell::RefCell;
    use std::io::{Read, Write};
    use std::net::{TcpListener, TcpStream};
    use std::path::{Path, PathBuf};
    use std::thread;

    struct Fixed(Vec<Device>);

    impl DeviceSource for Fixed {
        fn fetch_devices(&self) -> Vec<Device> {
            self.0.clone()
        }
    }

    #[derive(Default)]
    struct Recorder {
        printed: RefCell<Vec<(PathBuf, String)>>,
    }

    impl PrintBackend for Recorder {
        fn print_file(&self, file: &Path, printer: &str) -> Result<()> {
            self.printed
                .borrow_mut()
                .push((file.to_path_buf(), printer.to_string()));
            Ok(())
        }
    }

    /// Renderer that never finds a TrueType face, so output does not depend
    /// on the fonts installed on the machine.
    fn renderer(dir: &Path) -> LabelRenderer {
        let config = LabelConfig {
            font_dirs: Vec::new(),
            ..LabelConfig::default()
        };
        LabelRenderer::new(config, dir)
    }

    fn read_request_line(stream: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = stream.read(&mut chunk).unwrap_or(0);
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            if buf.windows(4).any(|w| w == b"\r\n\r\n") {
                break;
            }
        }
        String::from_utf8_lossy(&buf)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    /// Two-page NetBox stand-in: three physical devices and one VM.
    fn serve_two_pages() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let base = format!("http://{}", listener.local_addr().expect("addr"));
        let first = format!(
            r#"{{"count": 4, "next": "{base}/api/dcim/devices/?offset=2", "previous": null,
                "results": [
                  {{"id": 1, "name": "sw-01.lan", "asset_tag": "INV-001",
                    "device_type": {{"model": "C9300", "slug": "c9300"}}}},
                  {{"id": 2, "name": "vm-web.lan", "asset_tag": null,
                    "device_type": {{"model": "VM", "slug": "vm"}}}}
                ]}}"#
        );
        let second = r#"{"count": 4, "next": null, "previous": null,
            "results": [
              {"id": 3, "name": "ap-3.floor2", "asset_tag": "",
               "device_type": {"model": "AP-515", "slug": "ap-515"}},
              {"id": 4, "name": null, "asset_tag": "INV-004",
               "device_type": {"model": "", "slug": "pdu"}}
            ]}"#
        .to_string();

        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { continue };
                let line = read_request_line(&mut stream);
                let body = if line.contains("offset=2") { &second } else { &first };
                let reply = format!(
                    "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(reply.as_bytes());
            }
        });
        base
    }

    #[test]
    fn two_pages_of_inventory_end_up_on_the_printer() {
        let base = serve_two_pages();
        let out = tempfile::tempdir().expect("tempdir");
        let client = InventoryClient::new(&InventoryConfig {
            base_url: base,
            token: "t0ken".into(),
            page_size: None,
        })
        .expect("client");

        let devices = client.fetch_devices();
        assert_eq!(devices.len(), 3);

        let recorder = Recorder::default();
        let dispatcher = PrintDispatcher::new(&recorder, "Brother QL-720NW USB");
        let mut pipeline = Pipeline::new(client, renderer(out.path()), Some(dispatcher));
        let summary = pipeline.run();

        assert_eq!(summary.devices, 3);
        assert_eq!(summary.render_failures, 0);
        let titles: Vec<&str> = summary.rendered.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["sw-01", "ap-3", "unnamed-4"]);
        for label in &summary.rendered {
            assert!(label.path.is_file(), "{} missing", label.path.display());
        }

        let report = summary.print.expect("print report");
        assert_eq!(report.printed.len(), 3);
        assert!(report.is_complete());
        let printed = recorder.printed.borrow();
        assert_eq!(printed.len(), 3);
        assert!(printed.iter().all(|(_, printer)| printer == "Brother QL-720NW USB"));
    }

    #[test]
    fn empty_inventory_does_nothing() {
        let out = tempfile::tempdir().expect("tempdir");
        let recorder = Recorder::default();
        let mut pipeline = Pipeline::new(
            Fixed(Vec::new()),
            renderer(out.path()),
            Some(PrintDispatcher::new(&recorder, "QL")),
        );
        let summary = pipeline.run();

        assert_eq!(summary.devices, 0);
        assert!(summary.rendered.is_empty());
        assert!(summary.print.is_none());
        assert!(recorder.printed.borrow().is_empty());
        assert_eq!(std::fs::read_dir(out.path()).expect("read_dir").count(), 0);
    }

    #[test]
    fn render_only_skips_the_printer() {
        let out = tempfile::tempdir().expect("tempdir");
        let mut pipeline: Pipeline<_, Recorder> = Pipeline::new(
            Fixed(vec![Device::new(7, "rtr-7", "INV-7"), Device::new(8, "rtr-8", "")]),
            renderer(out.path()),
            None,
        );
        let summary = pipeline.run();

        assert_eq!(summary.rendered.len(), 2);
        assert!(summary.print.is_none());
        assert!(out.path().join("rtr-7.png").is_file());
        assert!(out.path().join("rtr-8.png").is_file());
    }

    #[test]
    fn render_failures_are_counted_and_printing_skipped() {
        let out = tempfile::tempdir().expect("tempdir");
        let recorder = Recorder::default();
        let mut pipeline = Pipeline::new(
            Fixed(vec![Device::new(1, "a", ""), Device::new(2, "b", "")]),
            renderer(&out.path().join("missing")),
            Some(PrintDispatcher::new(&recorder, "QL")),
        );
        let summary = pipeline.run();

        assert_eq!(summary.devices, 2);
        assert_eq!(summary.render_failures, 2);
        assert!(summary.print.is_none());
        assert!(recorder.printed.borrow().is_empty());
    }

    #[test]
    fn print_failures_do_not_stop_the_batch() {
        struct Jammed;
        impl PrintBackend for Jammed {
            fn print_file(&self, _: &Path, _: &str) -> Result<()> {
                Err(LabelError::Print("paper jam".into()))
            }
        }

        let out = tempfile::tempdir().expect("tempdir");
        let mut pipeline = Pipeline::new(
            Fixed(vec![Device::new(1, "a", ""), Device::new(2, "b", "")]),
            renderer(out.path()),
            Some(PrintDispatcher::new(Jammed, AppConfig::default().printer.name)),
        );
        let report = pipeline.run().print.expect("print report");
        assert_eq!(report.failed.len(), 2);
        assert!(report.printed.is_empty());
    }
}

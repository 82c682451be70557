// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers: a scratch project, the binary, and a one-shot callback server.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::Output;
use std::thread::JoinHandle;

/// Environment variables that would leak host configuration into specs.
const SCRUBBED: &[&str] = &[
    "EDGEPUB_CLEANUP_ON_DELETE",
    "EDGEPUB_WATCH_ATTEMPTS",
    "EDGEPUB_LOG_LOCATION",
    "EDGEPUB_ACCOUNT_ID",
    "EDGEPUB_AWS_CLI",
    "AWS_REGION",
    "AWS_DEFAULT_REGION",
    "AWS_LAMBDA_LOG_STREAM_NAME",
];

pub struct Project {
    dir: tempfile::TempDir,
}

impl Project {
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a file relative to the project root.
    pub fn file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&path, content).unwrap();
        path
    }

    /// Write an executable script.
    pub fn script(&self, name: &str, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;
        let path = self.file(name, &format!("#!/bin/bash\n{body}\n"));
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    pub fn edgepub(&self) -> Cli {
        let mut cmd = assert_cmd::Command::cargo_bin("edgepub").unwrap();
        cmd.current_dir(self.dir.path()).env("EDGEPUB_LOG", "debug");
        for var in SCRUBBED {
            cmd.env_remove(var);
        }
        Cli { cmd }
    }
}

pub struct Cli {
    cmd: assert_cmd::Command,
}

impl Cli {
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    pub fn env(mut self, key: &str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        self.cmd.env(key, value);
        self
    }

    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.cmd.write_stdin(input);
        self
    }

    pub fn passes(mut self) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run { output };
        assert!(
            run.output.status.success(),
            "expected success\n{}",
            run.describe()
        );
        run
    }

    pub fn exits_with(mut self, code: i32) -> Run {
        let output = self.cmd.output().unwrap();
        let run = Run { output };
        assert_eq!(
            run.output.status.code(),
            Some(code),
            "unexpected exit\n{}",
            run.describe()
        );
        run
    }
}

pub struct Run {
    output: Output,
}

impl Run {
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    fn describe(&self) -> String {
        format!(
            "status: {}\nstdout:\n{}\nstderr:\n{}",
            self.output.status,
            self.stdout(),
            self.stderr()
        )
    }
}

/// A request captured by [`CallbackServer`].
pub struct Captured {
    pub request_line: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl Captured {
    pub fn header(&self, name: &str) -> Option<&str> {
        self
            .headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Accepts a single HTTP request and answers 200.
pub struct CallbackServer {
    pub url: String,
    handle: JoinHandle<Captured>,
}

impl CallbackServer {
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!(
            "http://{}/presigned?sig=abc",
            listener.local_addr().unwrap()
        );
        let handle = std::thread::spawn(move || {
            let (mut socket, _) = listener.accept().unwrap();
            let captured = read_request(&mut socket);
            socket
                .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
                .unwrap();
            captured
        });
        Self { url, handle }
    }

    pub fn request(self) -> Captured {
        self.handle.join().unwrap()
    }
}

fn read_request(socket: &mut std::net::TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = socket.read(&mut chunk).unwrap();
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf).into_owned();
        if let Some((head, body)) = text.split_once("\r\n\r\n") {
            let mut lines = head.lines();
            let request_line = lines.next().unwrap_or_default().to_string();
            let headers: Vec<(String, String)> = lines
                .filter_map(|l| l.split_once(':'))
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .collect();
            let captured = Captured {
                request_line,
                headers,
                body: body.to_string(),
            };
            let expected: usize = captured
                .header("content-length")
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
            if captured.body.len() >= expected || n == 0 {
                return captured;
            }
        } else if n == 0 {
            panic!("connection closed before headers: {text}");
        }
    }
}

/// Job parameters as the build backend injects them.
pub fn job_env(response_url: &str) -> Vec<(&'static str, String)> {
    vec![
        ("assetUrl", "s3://cdk-assets/source.zip".to_string()),
        ("extractPath", "exporter".to_string()),
        ("projectName", "gdk-publish-exporter".to_string()),
        ("responseURL", response_url.to_string()),
        ("stackId", "arn:aws:cloudformation:us-east-1:123456789012:stack/edge/1".to_string()),
        ("requestId", "req-1".to_string()),
        ("logicalResourceId", "ExporterPublish".to_string()),
        ("componentName", "com.example.Exporter".to_string()),
    ]
}

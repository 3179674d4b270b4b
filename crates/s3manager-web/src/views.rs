use std::path::Path;

use handlebars::Handlebars;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use s3manager_common::{
    error::{ManagerError, Result},
    time::format_display,
    types::{BucketInfo, ObjectInfo},
};
use serde::Serialize;
use tracing::debug;

pub const LAYOUT_TEMPLATE: &str = "layout";
pub const BUCKETS_TEMPLATE: &str = "buckets";
pub const BUCKET_TEMPLATE: &str = "bucket";

const TEMPLATE_EXTENSION: &str = "hbs";

// RFC 3986 path segment: everything but unreserved and sub-delims is escaped.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'\\')
    .add(b'^')
    .add(b'|');

pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);

        for name in [LAYOUT_TEMPLATE, BUCKETS_TEMPLATE, BUCKET_TEMPLATE] {
            let path = dir.join(format!("{name}.{TEMPLATE_EXTENSION}"));
            registry
                .register_template_file(name, &path)
                .map_err(|err| {
                    ManagerError::Template(format!("failed to load {}: {err}", path.display()))
                })?;
        }

        debug!(dir = %dir.display(), "templates loaded");
        Ok(Self { registry })
    }

    pub fn render<T: Serialize>(&self, name: &str, data: &T) -> Result<String> {
        self.registry
            .render(name, data)
            .map_err(|err| ManagerError::Template(format!("failed to render {name}: {err}")))
    }
}

#[derive(Debug, Serialize)]
pub struct BucketsPage {
    pub title: String,
    pub buckets: Vec<BucketRow>,
}

#[derive(Debug, Serialize)]
pub struct BucketRow {
    pub name: String,
    pub url: String,
    pub created: String,
}

impl BucketsPage {
    pub fn new(buckets: &[BucketInfo]) -> Self {
        Self {
            title: "Buckets".to_string(),
            buckets: buckets
                .iter()
                .map(|bucket| BucketRow {
                    name: bucket.name.clone(),
                    url: format!("/buckets/{}", encode_segment(&bucket.name)),
                    created: format_display(bucket.created.as_ref()),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct BucketPage {
    pub title: String,
    pub bucket_name: String,
    pub objects: Vec<ObjectRow>,
}

#[derive(Debug, Serialize)]
pub struct ObjectRow {
    pub key: String,
    pub size: String,
    pub last_modified: String,
    pub icon: &'static str,
    pub url: String,
}

impl BucketPage {
    pub fn new(bucket: &str, objects: &[ObjectInfo]) -> Self {
        Self {
            title: bucket.to_string(),
            bucket_name: bucket.to_string(),
            objects: objects
                .iter()
                .map(|object| ObjectRow {
                    key: object.key.clone(),
                    size: format_size(object.size),
                    last_modified: format_display(object.last_modified.as_ref()),
                    icon: icon(&object.key),
                    url: object_url(bucket, &object.key),
                })
                .collect(),
        }
    }
}

pub fn encode_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// API path of an object; each `/`-separated part of the key is encoded on its own.
pub fn object_url(bucket: &str, key: &str) -> String {
    let key = key.split('/').map(encode_segment).collect::<Vec<_>>().join("/");
    format!("/api/buckets/{}/objects/{key}", encode_segment(bucket))
}

/// Material icon name for an object key.
pub fn icon(key: &str) -> &'static str {
    let extension = Path::new(key)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "tgz" | "gz" | "zip" | "tar" | "bz2" | "xz" | "7z" | "rar" | "zst" => "archive",
        "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" | "bmp" | "ico" => "photo",
        "mp3" | "wav" | "flac" | "ogg" | "m4a" => "music_note",
        "mp4" | "mov" | "avi" | "mkv" | "webm" => "movie",
        "rs" | "go" | "js" | "ts" | "py" | "java" | "c" | "h" | "sh" | "json" | "yaml"
        | "yml" | "toml" | "xml" | "html" | "css" => "code",
        "pdf" | "txt" | "md" | "doc" | "docx" | "csv" | "odt" => "description",
        _ => "insert_drive_file",
    }
}

pub fn format_size(size: i64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];

    let bytes = size.max(0) as u64;
    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

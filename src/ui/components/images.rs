// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Texture cache for certificate previews.
//!
//! Bytes are fetched and decoded on a worker; only texture upload happens on
//! the UI thread, since it needs the egui context.

use std::collections::{HashMap, HashSet};

use crate::models::certificate::FileSource;

/// Longest edge of a tile thumbnail, in pixels.
pub const THUMBNAIL_MAX: u32 = 256;
/// Longest edge of a full preview, in pixels.
pub const FULL_MAX: u32 = 1600;

/// Size class of a decoded preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageVariant {
    Thumbnail,
    Full,
}

impl ImageVariant {
    fn max_edge(self) -> u32 {
        match self {
            ImageVariant::Thumbnail => THUMBNAIL_MAX,
            ImageVariant::Full => FULL_MAX,
        }
    }
}

/// Cache key: which file, at which size.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ImageKey {
    pub source: FileSource,
    pub variant: ImageVariant,
}

impl ImageKey {
    pub fn thumbnail(source: FileSource) -> Self {
        Self {
            source,
            variant: ImageVariant::Thumbnail,
        }
    }

    pub fn full(source: FileSource) -> Self {
        Self {
            source,
            variant: ImageVariant::Full,
        }
    }
}

/// What the view should draw for a key.
pub enum ImageState<'a> {
    Ready(&'a egui::TextureHandle),
    Loading,
    Failed,
    Missing,
}

/// Textures plus bookkeeping so each key is fetched at most once.
#[derive(Default)]
pub struct ImageCache {
    textures: HashMap<ImageKey, egui::TextureHandle>,
    in_flight: HashSet<ImageKey>,
    failures: HashSet<ImageKey>,
}

impl ImageCache {
    /// Current state of `key`.
    pub fn state(&self, key: &ImageKey) -> ImageState<'_> {
        if let Some(texture) = self.textures.get(key) {
            ImageState::Ready(texture)
        } else if self.in_flight.contains(key) {
            ImageState::Loading
        } else if self.failures.contains(key) {
            ImageState::Failed
        } else {
            ImageState::Missing
        }
    }

    /// Mark `key` as requested. Returns false when it is cached, loading, or known to fail.
    pub fn begin(&mut self, key: &ImageKey) -> bool {
        if self.textures.contains_key(key)
            || self.failures.contains(key)
            || self.in_flight.contains(key)
        {
            return false;
        }
        self.in_flight.insert(key.clone());
        true
    }

    pub fn insert(&mut self, key: ImageKey, texture: egui::TextureHandle) {
        self.in_flight.remove(&key);
        self.failures.remove(&key);
        self.textures.insert(key, texture);
    }

    pub fn fail(&mut self, key: ImageKey) {
        self.in_flight.remove(&key);
        self.failures.insert(key);
    }

    /// Drop every entry for one certificate, e.g. after it was deleted or replaced.
    pub fn forget(&mut self, source: &FileSource) {
        self.textures.retain(|key, _| &key.source != source);
        self.in_flight.retain(|key| &key.source != source);
        self.failures.retain(|key| &key.source != source);
    }

    pub fn clear(&mut self) {
        self.textures.clear();
        self.in_flight.clear();
        self.failures.clear();
    }
}

/// Decode image bytes and downscale them for `variant`.
pub fn decode_preview(bytes: &[u8], variant: ImageVariant) -> Result<egui::ColorImage, String> {
    let max = variant.max_edge();
    let dyn_img = image::load_from_memory(bytes).map_err(|e| e.to_string())?;
    let resized = if dyn_img.width() > max || dyn_img.height() > max {
        dyn_img.thumbnail(max, max)
    } else {
        dyn_img
    };
    let rgba = resized.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, &rgba.into_raw()))
}

/// Draw a texture scaled to fit within `max` while keeping its aspect ratio.
pub fn show_texture(ui: &mut egui::Ui, texture: &egui::TextureHandle, max: egui::Vec2) -> egui::Response {
    let size = texture.size_vec2();
    let scale = (max.x / size.x).min(max.y / size.y).min(1.0);
    ui.add(egui::Image::new((texture.id(), size * scale)))
}

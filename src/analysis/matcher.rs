//! Reachability matching
//!
//! Media assets are matched against literal reference strings with an ordered list of
//! heuristics. Components and animations are matched by resolving module references
//! to files on disk.

use super::ModuleResolver;
use crate::config::Config;
use crate::extract::has_media_extension;
use crate::graph::{ReferenceKind, ReferenceSet};
use crate::inventory::{AssetCategory, AssetRecord};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, trace};

/// A path normalized for media matching: lowercase, forward slashes, no query or
/// fragment, no leading `./`, `../` or `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPath {
    normalized: String,
    directories: Vec<String>,
    basename: String,
    stem: String,
}

impl MediaPath {
    /// Returns `None` for strings that normalize to nothing
    pub fn parse(raw: &str) -> Option<Self> {
        let lowered = raw.trim().to_lowercase().replace('\\', "/");
        let without_query = lowered
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or("");

        let mut rest = without_query;
        loop {
            if let Some(stripped) = rest.strip_prefix("./") {
                rest = stripped;
            } else if let Some(stripped) = rest.strip_prefix("../") {
                rest = stripped;
            } else if let Some(stripped) = rest.strip_prefix('/') {
                rest = stripped;
            } else {
                break;
            }
        }

        if rest.is_empty() {
            return None;
        }

        let mut components: Vec<&str> = rest.split('/').collect();
        let basename = components.pop().unwrap_or("").to_string();
        let directories = components
            .into_iter()
            .filter(|c| !c.is_empty() && *c != "." && *c != "..")
            .map(str::to_string)
            .collect();
        let stem = match basename.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem.to_string(),
            _ => basename.clone(),
        };

        Some(Self {
            normalized: rest.to_string(),
            directories,
            basename,
            stem,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    /// The path after the first directory component equal to `segment`
    fn suffix_after(&self, segment: &str) -> Option<String> {
        let position = self.directories.iter().position(|d| d == segment)?;
        let mut tail: Vec<&str> = self.directories[position + 1..]
            .iter()
            .map(String::as_str)
            .collect();
        tail.push(&self.basename);
        Some(tail.join("/"))
    }

    /// Whether `other`'s directories are a trailing run of this path's directories
    fn ends_with_directories_of(&self, other: &MediaPath) -> bool {
        self.directories.ends_with(&other.directories)
    }
}

/// Ordered media matching heuristics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStrategy {
    /// One normalized path contains the other on a segment boundary
    Containment,
    /// Same file name, and the reference's directories do not contradict the asset's
    Basename,
    /// Same file name ignoring the extension, same directory rule as `Basename`
    Stem,
    /// Both paths share an asset segment and agree exactly after it
    SegmentSuffix,
}

impl MediaStrategy {
    pub const ORDERED: [MediaStrategy; 4] = [
        MediaStrategy::Containment,
        MediaStrategy::Basename,
        MediaStrategy::Stem,
        MediaStrategy::SegmentSuffix,
    ];

    pub fn matches(&self, asset: &MediaPath, reference: &MediaPath, segments: &[String]) -> bool {
        match self {
            MediaStrategy::Containment => contains_either_way(asset, reference),
            MediaStrategy::Basename => same_basename(asset, reference),
            MediaStrategy::Stem => same_stem(asset, reference),
            MediaStrategy::SegmentSuffix => same_segment_suffix(asset, reference, segments),
        }
    }
}

/// Strategy 1
pub fn contains_either_way(asset: &MediaPath, reference: &MediaPath) -> bool {
    contains_on_boundary(asset.as_str(), reference.as_str())
        || contains_on_boundary(reference.as_str(), asset.as_str())
}

/// Strategy 2
pub fn same_basename(asset: &MediaPath, reference: &MediaPath) -> bool {
    asset.basename == reference.basename && asset.ends_with_directories_of(reference)
}

/// Strategy 3
pub fn same_stem(asset: &MediaPath, reference: &MediaPath) -> bool {
    asset.stem == reference.stem && asset.ends_with_directories_of(reference)
}

/// Strategy 4. A segment present in only one of the two paths never matches.
pub fn same_segment_suffix(asset: &MediaPath, reference: &MediaPath, segments: &[String]) -> bool {
    segments.iter().any(|segment| {
        let segment = segment.to_lowercase();
        match (asset.suffix_after(&segment), reference.suffix_after(&segment)) {
            (Some(a), Some(r)) => a == r,
            _ => false,
        }
    })
}

fn contains_on_boundary(haystack: &str, needle: &str) -> bool {
    haystack
        .match_indices(needle)
        .any(|(i, _)| i == 0 || haystack.as_bytes()[i - 1] == b'/')
}

/// Decides whether an inventory entry is referenced by anything in the reference set.
///
/// Built once per audit run; module references are resolved up front.
pub struct ReachabilityMatcher {
    media_references: Vec<MediaPath>,
    resolved_modules: HashSet<String>,
    asset_segments: Vec<String>,
    entry_points: Vec<String>,
}

impl ReachabilityMatcher {
    pub fn new(references: &ReferenceSet, config: &Config, project_root: &Path) -> Self {
        let assets = &config.assets;
        let resolver = ModuleResolver::new(project_root, &assets.module_probe_extensions);

        let mut media_references = Vec::new();
        let mut resolved_modules = HashSet::new();

        for edge in references.iter() {
            let is_media = match edge.kind {
                ReferenceKind::DynamicImport => false,
                ReferenceKind::Import => has_media_extension(&edge.raw, &assets.media_extensions),
                _ => true,
            };

            if is_media {
                if let Some(path) = MediaPath::parse(&edge.raw) {
                    media_references.push(path);
                }
            } else if let Some(resolved) = resolver.resolve_relative(&edge.origin, &edge.raw) {
                resolved_modules.insert(resolved);
            }
        }

        debug!(
            "Matcher ready: {} media references, {} resolved modules",
            media_references.len(),
            resolved_modules.len()
        );

        Self {
            media_references,
            resolved_modules,
            asset_segments: assets.asset_segments.clone(),
            entry_points: assets.entry_points.clone(),
        }
    }

    /// Whether any reference covers `asset`
    pub fn is_referenced(&self, asset: &AssetRecord) -> bool {
        match asset.category {
            AssetCategory::Image => self.media_match(&asset.path).is_some(),
            AssetCategory::Component | AssetCategory::Animation => {
                self.is_entry_point(&asset.path) || self.resolved_modules.contains(&asset.path.to_lowercase())
            }
        }
    }

    /// First strategy that matches a media asset path, if any
    pub fn media_match(&self, asset_path: &str) -> Option<MediaStrategy> {
        let asset = MediaPath::parse(asset_path)?;
        for reference in &self.media_references {
            for strategy in MediaStrategy::ORDERED {
                if strategy.matches(&asset, reference, &self.asset_segments) {
                    trace!("{} matched {} by {:?}", asset_path, reference.as_str(), strategy);
                    return Some(strategy);
                }
            }
        }
        None
    }

    fn is_entry_point(&self, path: &str) -> bool {
        self.entry_points.iter().any(|e| e.eq_ignore_ascii_case(path))
    }
}

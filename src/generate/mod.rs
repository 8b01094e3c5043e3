//! End-to-end generation
//!
//! Scan, classify, compose and render without touching the filesystem, then
//! optionally write both artifacts. Nothing is written until both documents
//! have rendered successfully.

use crate::compose::{Composer, Configuration, SecurityLevel};
use crate::config::StackguardConfig;
use crate::detect::{self, Classification, TagSet};
use crate::render::{self, Platform, RenderOptions, RenderedOutput};
use crate::scanner::{self, ScanOptions, SignalSet};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};


/// What the scanner and classifier found
#[derive(Debug, Clone)]
pub struct Detection {
    pub signals: SignalSet,
    pub classification: Classification,
}

impl Detection {
    pub fn tags(&self) -> &TagSet {
        &self.classification.tags
    }
}

/// A fully rendered, unwritten generation result
#[derive(Debug, Clone)]
pub struct Plan {
    pub detection: Detection,
    pub configuration: Configuration,
    pub rendered: RenderedOutput,
}

/// Paths of the files a plan was written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    pub config_path: PathBuf,
    pub manifest_path: PathBuf,
}

/// Runs the pipeline with one set of scan and render options
#[derive(Debug, Clone)]
pub struct Generator {
    scan: ScanOptions,
    render: RenderOptions,
    composer: Composer,
}

impl Generator {
    /// The rendered artifacts are excluded from scanning so reruns see the
    /// same project
    pub fn new(mut scan: ScanOptions, render: RenderOptions) -> Self {
        for file in [&render.config_file, &render.manifest_file] {
            if !scan.excluded_files.contains(file) {
                scan.excluded_files.push(file.clone());
            }
        }
        Self {
            scan,
            render,
            composer: Composer::new(),
        }
    }

    /// Build from loaded settings; `platform` overrides `render.platform`
    pub fn from_config(config: &StackguardConfig, platform: Option<Platform>) -> Result<Self> {
        let render = match platform {
            Some(platform) => config.render_options_for(platform),
            None => config.render_options()?,
        };
        Ok(Self::new(config.scan_options(), render))
    }

    pub fn scan_options(&self) -> &ScanOptions {
        &self.scan
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render
    }

    pub fn detect(&self, root: &Path) -> Result<Detection> {
        detect(root, &self.scan)
    }

    /// Everything up to, but not including, writing files
    pub fn plan(&self, root: &Path, level: SecurityLevel) -> Result<Plan> {
        let detection = self.detect(root)?;
        let configuration = self.composer.compose(detection.tags(), level);
        tracing::info!(
            "Composed {} tool groups for level {}",
            configuration.len(),
            level
        );

        let rendered = render::render_with(&configuration, &self.render)?;

        Ok(Plan {
            detection,
            configuration,
            rendered,
        })
    }

    pub fn write_plan(&self, root: &Path, plan: &Plan) -> Result<WrittenArtifacts> {
        let config_path = root.join(&self.render.config_file);
        let manifest_path = root.join(&self.render.manifest_file);

        let config = StagedFile::stage(&config_path, &plan.rendered.config)?;
        let manifest = match StagedFile::stage(&manifest_path, &plan.rendered.manifest_text) {
            Ok(staged) => staged,
            Err(e) => {
                config.discard();
                return Err(e);
            }
        };
        commit_all(vec![config, manifest])?;

        Ok(WrittenArtifacts {
            config_path,
            manifest_path,
        })
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new(ScanOptions::default(), RenderOptions::default())
    }
}

/// Scan `root` and classify what was found
pub fn detect(root: &Path, options: &ScanOptions) -> Result<Detection> {
    let signals = scanner::scan(root, options)?;
    let classification = detect::classify_with_evidence(&signals);
    tracing::info!("Detected technologies: {}", classification.tags);

    Ok(Detection {
        signals,
        classification,
    })
}

/// Contents written to a sibling temporary file, not yet in place
struct StagedFile {
    temp: PathBuf,
    target: PathBuf,
}

impl StagedFile {
    fn stage(target: &Path, contents: &str) -> Result<Self> {
        let parent = target
            .parent()
            .with_context(|| format!("{} has no parent directory", target.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;

        let temp = sibling(target, "tmp")?;
        if let Err(e) = fs::write(&temp, contents) {
            let _ = fs::remove_file(&temp);
            return Err(e).with_context(|| format!("Failed to write {}", temp.display()));
        }

        tracing::debug!("Staged {} ({} bytes)", target.display(), contents.len());
        Ok(Self {
            temp,
            target: target.to_path_buf(),
        })
    }

    fn discard(&self) {
        let _ = fs::remove_file(&self.temp);
    }

    /// Move the staged file into place, returning the backup of the file it replaced
    fn commit(&self) -> Result<Option<PathBuf>> {
        let backup = if self.target.exists() {
            let backup = sibling(&self.target, "bak")?;
            fs::rename(&self.target, &backup)
                .with_context(|| format!("Failed to replace {}", self.target.display()))?;
            Some(backup)
        } else {
            None
        };

        if let Err(e) = fs::rename(&self.temp, &self.target) {
            if let Some(backup) = &backup {
                let _ = fs::rename(backup, &self.target);
            }
            return Err(e).with_context(|| format!("Failed to replace {}", self.target.display()));
        }
        Ok(backup)
    }

    /// Undo a successful `commit`
    fn rollback(&self, backup: Option<&PathBuf>) {
        let _ = fs::remove_file(&self.target);
        if let Some(backup) = backup {
            let _ = fs::rename(backup, &self.target);
        }
    }
}

fn sibling(target: &Path, suffix: &str) -> Result<PathBuf> {
    let file_name = target
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("Invalid output file name {}", target.display()))?;
    let name = format!(".{}.{}.{}", file_name, std::process::id(), suffix);
    Ok(target.with_file_name(name))
}

/// Put every staged file in place, or none of them
fn commit_all(staged: Vec<StagedFile>) -> Result<()> {
    if let Some(blocked) = staged.iter().find(|s| s.target.is_dir()) {
        let message = format!("Cannot write {}: it is a directory", blocked.target.display());
        staged.iter().for_each(StagedFile::discard);
        anyhow::bail!(message);
    }

    let mut committed: Vec<(&StagedFile, Option<PathBuf>)> = Vec::new();
    for (index, file) in staged.iter().enumerate() {
        match file.commit() {
            Ok(backup) => committed.push((file, backup)),
            Err(e) => {
                staged[index..].iter().for_each(StagedFile::discard);
                for (done, backup) in committed.iter().rev() {
                    done.rollback(backup.as_ref());
                }
                return Err(e);
            }
        }
    }

    for (file, backup) in committed {
        if let Some(backup) = backup {
            let _ = fs::remove_file(backup);
        }
        tracing::debug!("Wrote {}", file.target.display());
    }
    Ok(())
}

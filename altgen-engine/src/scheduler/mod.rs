//! The emission scheduler.
//!
//! [`Engine`] owns the registry and the bookkeeping that outlives a batch:
//! the single-shot suppression set (outputs whose reimport notification
//! must be absorbed) and the single-shot deferred set (sources reimported
//! to run a cascade in the next batch). Everything else lives in a
//! [`Batch`] that is dropped when the batch ends, however it ends.
//!
//! A batch goes through the phases of [`BatchPhase`]:
//!
//! 1. Collecting - normalize paths, consume suppressions, apply filters
//! 2. ResolvingTargets - classify paths into direct and cascaded work
//! 3. RunningDirect - run the declarations of changed targets
//! 4. RunningCascaded - run cascades now if nothing was written, defer
//!    them to the next batch otherwise
//! 5. RequestingReimport - suppress written outputs, ask for reimports
//! 6. Done

use std::path::{Path, PathBuf};

use altgen_core::{TypeName, normalize};
use altgen_manifest::Settings;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, error, info, info_span, warn};

use crate::{
    BatchPhase, BatchReport, Classification, DeclarationId, DeclarationProvider, Diagnostic,
    DiscoveryReport, EmitOutcome, GeneratorCatalog, Host, Plugin, Registry,
    classify::Classifier, host::LookupCache, resolver::resolve_output_path, writer::try_emit,
};


/// Per-batch state, dropped at the end of every batch.
struct Batch {
    /// Forced batches bypass overwrite policies and run cascades now.
    forced: bool,
    lookups: LookupCache,
    /// Sources that were reimported to run a deferred cascade.
    deferred_hits: IndexSet<String>,
    /// Declarations to run now, with the source that triggered them.
    run: IndexMap<DeclarationId, String>,
    cascaded: IndexSet<DeclarationId>,
    written: IndexSet<String>,
    deferred: IndexSet<String>,
    updated: bool,
    report: BatchReport,
}

impl Batch {
    fn new(forced: bool) -> Self {
        Self {
            forced,
            lookups: LookupCache::default(),
            deferred_hits: IndexSet::new(),
            run: IndexMap::new(),
            cascaded: IndexSet::new(),
            written: IndexSet::new(),
            deferred: IndexSet::new(),
            updated: false,
            report: BatchReport::new(forced),
        }
    }
}

/// The generation engine.
///
/// # Example
///
/// ```ignore
/// let mut engine = Engine::new(project_root, manifest.settings.clone());
/// let discovery = engine.discover(&ManifestProvider::new(&manifest), &catalog);
///
/// // called by the host for every batch of changed files
/// let report = engine.on_files_changed(&mut host, &["Assets/Foo.cs"]);
/// ```
pub struct Engine {
    root: PathBuf,
    settings: Settings,
    registry: Registry,
    suppressed: IndexSet<String>,
    deferred: IndexSet<String>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Engine {
    /// Create an engine for the project at `root` with an empty registry.
    pub fn new(root: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            root: root.into(),
            settings,
            registry: Registry::default(),
            suppressed: IndexSet::new(),
            deferred: IndexSet::new(),
            plugins: Vec::new(),
        }
    }

    /// Add a plugin to receive batch phase hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Rebuild the registry, replacing every previous declaration.
    pub fn discover(
        &mut self,
        provider: &dyn DeclarationProvider,
        catalog: &GeneratorCatalog,
    ) -> DiscoveryReport {
        let (registry, report) = Registry::discover(provider, catalog);
        info!(
            accepted = report.accepted.len(),
            rejected = report.rejected.len(),
            "discovered declarations"
        );
        self.registry = registry;
        report
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Whether the next notification of `path` will be absorbed.
    pub fn is_suppressed(&self, path: &str) -> bool {
        self.suppressed.contains(normalize(path).as_str())
    }

    /// Outputs waiting for their reimport notification.
    pub fn pending_suppressions(&self) -> impl Iterator<Item = &str> {
        self.suppressed.iter().map(String::as_str)
    }

    /// Sources reimported to run a deferred cascade.
    pub fn deferred_paths(&self) -> impl Iterator<Item = &str> {
        self.deferred.iter().map(String::as_str)
    }

    /// Classify a path the way a notification batch would.
    pub fn classify(&self, host: &dyn Host, path: &str) -> Classification {
        self.classifier()
            .classify(&normalize(path), host, &mut LookupCache::default(), false)
    }

    /// Project-relative output path of the first declaration of a target.
    pub fn output_path_for(&self, host: &dyn Host, target: &TypeName) -> Option<String> {
        let declaration = self.registry.for_target(target).next()?;
        let source = host.resolve_path_for_type(target)?;
        Some(resolve_output_path(declaration, &source))
    }

    /// Handle a batch of changed paths from the host.
    pub fn on_files_changed<I>(&mut self, host: &mut dyn Host, paths: I) -> BatchReport
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.run_batch(host, paths, false)
    }

    /// Regenerate a target, or every target of a generator.
    ///
    /// Overwrite policies are ignored. Returns whether a file was written.
    pub fn force_generate(&mut self, host: &mut dyn Host, ty: &TypeName) -> bool {
        self.force_generate_report(host, ty).wrote_any()
    }

    /// Like [`force_generate`](Self::force_generate), returning the full report.
    pub fn force_generate_report(&mut self, host: &mut dyn Host, ty: &TypeName) -> BatchReport {
        match host.resolve_path_for_type(ty) {
            Some(path) => self.run_batch(host, [path], true),
            None => {
                warn!(r#type = %ty, "no source found for type");
                let mut report = BatchReport::new(true);
                report.diagnostics.push(
                    Diagnostic::warning(BatchPhase::Collecting, "no source found for type")
                        .at(ty.to_string()),
                );
                report
            }
        }
    }

    /// Regenerate from explicit paths, generated files included.
    ///
    /// Overwrite policies are ignored and cascades run immediately.
    pub fn force_generate_paths<I>(&mut self, host: &mut dyn Host, paths: I) -> BatchReport
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.run_batch(host, paths, true)
    }

    fn classifier(&self) -> Classifier<'_> {
        Classifier {
            registry: &self.registry,
            settings: &self.settings,
        }
    }

    fn run_batch<I>(&mut self, host: &mut dyn Host, paths: I, forced: bool) -> BatchReport
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let span = info_span!("batch", forced);
        let _guard = span.enter();
        let mut batch = Batch::new(forced);

        self.before(BatchPhase::Collecting, &mut batch);
        let paths = self.collect(paths, &mut batch);
        self.after(BatchPhase::Collecting, &mut batch);

        self.before(BatchPhase::ResolvingTargets, &mut batch);
        self.resolve_targets(&*host, paths, &mut batch);
        self.after(BatchPhase::ResolvingTargets, &mut batch);

        self.before(BatchPhase::RunningDirect, &mut batch);
        self.run_direct(&mut batch);
        self.after(BatchPhase::RunningDirect, &mut batch);

        self.before(BatchPhase::RunningCascaded, &mut batch);
        self.run_cascaded(&*host, &mut batch);
        self.after(BatchPhase::RunningCascaded, &mut batch);

        self.before(BatchPhase::RequestingReimport, &mut batch);
        self.request_reimport(host, &mut batch);
        self.after(BatchPhase::RequestingReimport, &mut batch);

        self.before(BatchPhase::Done, &mut batch);
        self.after(BatchPhase::Done, &mut batch);

        debug!(
            ran = batch.report.ran.len(),
            written = batch.report.written.len(),
            deferred = batch.report.deferred.len(),
            "batch done"
        );
        batch.report
    }

    fn collect<I>(&mut self, paths: I, batch: &mut Batch) -> Vec<String>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let unique: IndexSet<String> = paths
            .into_iter()
            .map(|p| normalize(p.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();

        let mut collected = Vec::with_capacity(unique.len());
        for path in unique {
            if !batch.forced && self.suppressed.shift_remove(&path) {
                debug!(path = %path, "absorbed reimport of generated output");
                batch.report.suppressed.push(path);
                continue;
            }
            let deferred = self.deferred.shift_remove(&path);

            if !batch.forced {
                if !self.settings.auto_emit {
                    debug!(path = %path, "automatic generation is disabled");
                    continue;
                }
                if self.settings.is_auto_emit_disabled(&path) {
                    debug!(path = %path, "automatic generation is disabled for this path");
                    continue;
                }
            }

            if deferred {
                batch.deferred_hits.insert(path.clone());
            }
            collected.push(path);
        }
        collected
    }

    fn resolve_targets(&self, host: &dyn Host, paths: Vec<String>, batch: &mut Batch) {
        let classifier = self.classifier();

        for path in paths {
            if !self.root.join(&path).exists() {
                debug!(path = %path, "path no longer exists");
                if batch.forced {
                    batch.report.diagnostics.push(
                        Diagnostic::warning(BatchPhase::ResolvingTargets, "path does not exist")
                            .at(path),
                    );
                }
                continue;
            }

            let classification = classifier.classify(&path, host, &mut batch.lookups, batch.forced);
            debug!(path = %path, ?classification, "classified");
            match classification {
                Classification::Direct(target) => {
                    // a deferred source runs its own declarations without fanning out again
                    let fan_out = !batch.deferred_hits.contains(&path);
                    for declaration in self.registry.for_target(&target) {
                        batch
                            .run
                            .entry(declaration.id().clone())
                            .or_insert_with(|| path.clone());
                        if fan_out {
                            let siblings = self
                                .registry
                                .for_generator(declaration.generator_type())
                                .filter(|d| d.target() != &target);
                            batch.cascaded.extend(siblings.map(|d| d.id().clone()));
                        }
                    }
                }
                Classification::Generated(generator) if !batch.forced => {
                    debug!(path = %path, %generator, "generated file changed, not regenerating");
                }
                Classification::Generated(generator) | Classification::Generator(generator) => {
                    batch.cascaded.extend(
                        self.registry
                            .for_generator(&generator)
                            .map(|d| d.id().clone()),
                    );
                }
                Classification::Irrelevant => {
                    if batch.forced {
                        batch.report.diagnostics.push(
                            Diagnostic::warning(
                                BatchPhase::ResolvingTargets,
                                "not a registered target or generator",
                            )
                            .at(path),
                        );
                    }
                }
            }
        }
    }

    fn run_direct(&self, batch: &mut Batch) {
        let work: Vec<_> = batch
            .run
            .iter()
            .map(|(id, source)| (id.clone(), source.clone()))
            .collect();
        for (id, source) in work {
            if self.emit(&id, &source, BatchPhase::RunningDirect, batch) {
                batch.updated = true;
            }
        }
    }

    fn run_cascaded(&self, host: &dyn Host, batch: &mut Batch) {
        let pending: Vec<DeclarationId> = batch
            .cascaded
            .iter()
            .filter(|id| !batch.run.contains_key(*id))
            .cloned()
            .collect();
        if pending.is_empty() {
            return;
        }

        // a building host cannot reimport, so nothing could pick deferred work up
        let run_now = batch.forced || !batch.updated || host.is_building();
        for id in pending {
            let Some(source) = batch.lookups.path_for_type(host, &id.target) else {
                warn!(declaration = %id, "no source found for cascaded target");
                batch.report.diagnostics.push(
                    Diagnostic::warning(BatchPhase::RunningCascaded, "no source found for target")
                        .at(id.to_string()),
                );
                continue;
            };

            // both branches honour the automatic generation filters
            if !batch.forced && !self.is_automatic_source(&source) {
                debug!(
                    declaration = %id,
                    source = %source,
                    "cascaded target excluded from automatic generation"
                );
                continue;
            }
            if !run_now {
                debug!(declaration = %id, source = %source, "deferring cascade");
                batch.deferred.insert(source);
                continue;
            }
            if !self.root.join(&source).exists() {
                warn!(declaration = %id, source = %source, "source of cascaded target does not exist");
                batch.report.diagnostics.push(
                    Diagnostic::warning(BatchPhase::RunningCascaded, "source does not exist")
                        .at(source),
                );
                continue;
            }
            batch.report.cascaded = true;
            self.emit(&id, &source, BatchPhase::RunningCascaded, batch);
        }
    }

    fn request_reimport(&mut self, host: &mut dyn Host, batch: &mut Batch) {
        if host.is_building() {
            if !batch.written.is_empty() {
                debug!("host is building, not requesting reimport");
            }
            return;
        }

        for path in &batch.written {
            if !self.suppressed.insert(path.clone()) {
                debug!(path = %path, "output is already waiting for its reimport");
            }
            host.request_reimport(path);
        }
        for path in &batch.deferred {
            info!(path = %path, "deferred cascade to the next batch");
            self.deferred.insert(path.clone());
            batch.report.deferred.push(path.clone());
            host.request_reimport(path);
        }

        if !batch.written.is_empty() || batch.report.cascaded || !batch.deferred.is_empty() {
            host.request_global_refresh();
            batch.report.refresh_requested = true;
        }
    }

    /// Run one declaration. Failures are logged and recorded, never raised.
    fn emit(&self, id: &DeclarationId, source: &str, phase: BatchPhase, batch: &mut Batch) -> bool {
        let Some(declaration) = self.registry.get(id) else {
            error!(declaration = %id, "scheduled declaration is not registered");
            return false;
        };
        batch.report.ran.push(id.clone());

        match try_emit(&self.root, &self.settings, declaration, source, batch.forced) {
            Ok(EmitOutcome::Written(path)) => {
                info!(declaration = %id, path = %path, "generated");
                if batch.written.insert(path.clone()) {
                    batch.report.written.push(path);
                }
                true
            }
            Ok(EmitOutcome::Exists(path)) => {
                debug!(declaration = %id, path = %path, "output exists, not overwriting");
                batch.report.skipped.push(path);
                false
            }
            Ok(EmitOutcome::Discarded) => {
                debug!(declaration = %id, "nothing to write");
                false
            }
            Err(err) => {
                error!(declaration = %id, %phase, error = %format!("{:#}", err), "generation failed");
                batch
                    .report
                    .diagnostics
                    .push(Diagnostic::error(phase, format!("{:#}", err)).at(id.to_string()));
                false
            }
        }
    }

    /// Whether automatic generation may run for a target source.
    fn is_automatic_source(&self, source: &str) -> bool {
        self.settings.is_source_candidate(source) && !self.settings.is_auto_emit_disabled(source)
    }

    fn before(&self, phase: BatchPhase, batch: &mut Batch) {
        for plugin in &self.plugins {
            if let Err(err) = plugin.on_before_phase(phase, &mut batch.report) {
                self.plugin_failed(plugin.name(), phase, err, batch);
            }
        }
    }

    fn after(&self, phase: BatchPhase, batch: &mut Batch) {
        for plugin in &self.plugins {
            if let Err(err) = plugin.on_after_phase(phase, &mut batch.report) {
                self.plugin_failed(plugin.name(), phase, err, batch);
            }
        }
    }

    fn plugin_failed(&self, name: &str, phase: BatchPhase, err: eyre::Report, batch: &mut Batch) {
        warn!(plugin = name, %phase, error = %err, "plugin hook failed");
        batch.report.diagnostics.push(
            Diagnostic::error(phase, format!("plugin hook failed: {}", err)).at(name.to_string()),
        );
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("root", &self.root)
            .field("registry", &self.registry)
            .field("suppressed", &self.suppressed)
            .field("deferred", &self.deferred)
            .field("plugins", &self.plugins.len())
            .finish()
    }
}

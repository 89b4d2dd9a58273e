//! The in-build artifact cache.
//!
//! One [`ArtifactCache`] exists per build invocation. It is handed to every
//! phase that emits or reads synthesized artifacts and is dropped (or
//! unwrapped back into its sink) when the build completes.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use spur_common::{ArtifactName, ContentHash};
use spur_diagnostics::{codes, Diagnostic, DiagnosticSink, Severity};
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::manifest::ArtifactManifest;
use crate::sink::{ArtifactLookup, ArtifactSink};

/// How a duplicate artifact write is surfaced.
///
/// In both modes the second write is stored (replacing the first payload) and
/// forwarded to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// The duplicate write returns [`CacheError::DuplicateArtifactWrite`].
    Validate,
    /// The duplicate write is recorded as a warning and succeeds.
    Release,
}

impl WriteMode {
    /// Picks the mode from the `build.validate` configuration flag.
    pub fn from_validate(validate: bool) -> Self {
        if validate {
            WriteMode::Validate
        } else {
            WriteMode::Release
        }
    }
}

/// Wraps an [`ArtifactSink`], keeping a copy of every payload written through it.
///
/// Writes and reads are safe from concurrent build steps: a reader sees either
/// no payload or a complete one, and writers of distinct names never lose each
/// other's entries.
pub struct ArtifactCache<S> {
    sink: S,
    mode: WriteMode,
    entries: RwLock<HashMap<ArtifactName, Arc<[u8]>>>,
    duplicates: Mutex<Vec<ArtifactName>>,
    diagnostics: Option<Arc<DiagnosticSink>>,
}

impl<S: ArtifactSink> ArtifactCache<S> {
    /// Creates an empty cache in front of `sink`.
    pub fn new(sink: S, mode: WriteMode) -> Self {
        Self {
            sink,
            mode,
            entries: RwLock::new(HashMap::new()),
            duplicates: Mutex::new(Vec::new()),
            diagnostics: None,
        }
    }

    /// Reports duplicate writes into `diagnostics` as well.
    pub fn with_diagnostics(mut self, diagnostics: Arc<DiagnosticSink>) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Stores `payload` under `name` and forwards the write to the sink.
    ///
    /// A name may be written at most once per build. A second write still
    /// replaces the cached payload and reaches the sink; in
    /// [`WriteMode::Validate`] it then fails with
    /// [`CacheError::DuplicateArtifactWrite`].
    ///
    /// If the sink rejects the payload, the cache is left as it was before the
    /// call and the sink's error is returned.
    pub fn write(&self, name: &str, payload: &[u8]) -> Result<(), CacheError> {
        let name = ArtifactName::new(name);
        let stored: Arc<[u8]> = Arc::from(payload);
        let previous = self
            .entries
            .write()
            .insert(name.clone(), Arc::clone(&stored));

        if let Err(err) = self.sink.write(&name, payload) {
            self.roll_back(&name, &stored, previous);
            warn!(artifact = %name, error = %err, "artifact sink rejected write");
            return Err(err);
        }

        match previous {
            None => {
                debug!(artifact = %name, bytes = payload.len(), "cached artifact");
                Ok(())
            }
            Some(previous) => self.record_duplicate(name, &previous, payload),
        }
    }

    /// Undoes a cached insert whose forward failed, unless a concurrent
    /// write has replaced it in the meantime.
    fn roll_back(&self, name: &ArtifactName, stored: &Arc<[u8]>, previous: Option<Arc<[u8]>>) {
        let mut entries = self.entries.write();
        if !entries.get(name).is_some_and(|current| Arc::ptr_eq(current, stored)) {
            return;
        }
        match previous {
            Some(previous) => {
                entries.insert(name.clone(), previous);
            }
            None => {
                entries.remove(name);
            }
        }
    }

    fn record_duplicate(
        &self,
        name: ArtifactName,
        previous: &[u8],
        payload: &[u8],
    ) -> Result<(), CacheError> {
        let identical = ContentHash::from_bytes(previous) == ContentHash::from_bytes(payload);
        warn!(artifact = %name, identical, "artifact written twice");

        if let Some(diagnostics) = &self.diagnostics {
            let severity = match self.mode {
                WriteMode::Validate => Severity::Error,
                WriteMode::Release => Severity::Warning,
            };
            let note = if identical {
                "both payloads are byte-identical"
            } else {
                "the payloads differ; the first one was discarded"
            };
            diagnostics.emit(
                Diagnostic::new(
                    severity,
                    codes::DUPLICATE_ARTIFACT_WRITE,
                    "artifact was already synthesized and cached in this build",
                )
                .with_subject(name.as_str())
                .with_note(note),
            );
        }

        self.duplicates.lock().push(name.clone());

        match self.mode {
            WriteMode::Validate => Err(CacheError::DuplicateArtifactWrite { name }),
            WriteMode::Release => Ok(()),
        }
    }

    /// Returns the payload cached under `name`, in either spelling.
    pub fn read(&self, name: &str) -> Option<Arc<[u8]>> {
        self.entries.read().get(&ArtifactName::new(name)).cloned()
    }

    /// Returns every cached artifact name, sorted.
    pub fn names(&self) -> Vec<ArtifactName> {
        let mut names: Vec<_> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Returns the names that were written more than once, in write order.
    pub fn duplicates(&self) -> Vec<ArtifactName> {
        self.duplicates.lock().clone()
    }

    /// Returns the number of cached artifacts.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns `true` if nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Describes the cached artifacts for the build output.
    pub fn manifest(&self, producer_version: &str) -> ArtifactManifest {
        let mut manifest = ArtifactManifest::new(producer_version);
        for (name, payload) in self.entries.read().iter() {
            manifest.record(name.clone(), payload);
        }
        manifest
    }

    /// Returns the wrapped sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Ends the build, discarding the cached copies.
    pub fn into_sink(self) -> S {
        self.sink
    }
}

impl<S: ArtifactSink> ArtifactLookup for ArtifactCache<S> {
    fn class_data(&self, name: &str) -> Option<Vec<u8>> {
        self.read(name).map(|payload| payload.to_vec())
    }

    fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(&ArtifactName::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NullSink;

    #[derive(Default)]
    struct RecordingSink {
        writes: Mutex<Vec<(ArtifactName, Vec<u8>)>>,
    }

    impl ArtifactSink for RecordingSink {
        fn write(&self, name: &ArtifactName, payload: &[u8]) -> Result<(), CacheError> {
            self.writes.lock().push((name.clone(), payload.to_vec()));
            Ok(())
        }
    }

    /// Rejects every write while `failing` is set.
    #[derive(Default)]
    struct FailingSink {
        failing: std::sync::atomic::AtomicBool,
    }

    impl FailingSink {
        fn set_failing(&self, failing: bool) {
            self.failing
                .store(failing, std::sync::atomic::Ordering::SeqCst);
        }
    }

    impl ArtifactSink for FailingSink {
        fn write(&self, _name: &ArtifactName, _payload: &[u8]) -> Result<(), CacheError> {
            if self.failing.load(std::sync::atomic::Ordering::SeqCst) {
                return Err(CacheError::Serialization {
                    reason: "disk full".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn rejected_write_leaves_nothing_behind() {
        let cache = ArtifactCache::new(FailingSink::default(), WriteMode::Validate);
        cache.sink().set_failing(true);

        let err = cache
            .write("shop.Order$SpurInstantiator", b"code")
            .unwrap_err();
        assert!(matches!(err, CacheError::Serialization { .. }));
        assert!(cache.read("shop.Order$SpurInstantiator").is_none());
        assert!(!cache.contains("shop/Order$SpurInstantiator"));
        assert!(cache.is_empty());

        cache.sink().set_failing(false);
        cache.write("shop.Order$SpurInstantiator", b"code").unwrap();
        assert!(cache.duplicates().is_empty());
        assert_eq!(&*cache.read("shop.Order$SpurInstantiator").unwrap(), b"code");
    }

    #[test]
    fn rejected_rewrite_restores_previous_payload() {
        let cache = ArtifactCache::new(FailingSink::default(), WriteMode::Release);
        cache.write("shop.Order$SpurInstantiator", b"first").unwrap();

        cache.sink().set_failing(true);
        assert!(cache.write("shop.Order$SpurInstantiator", b"second").is_err());

        assert_eq!(&*cache.read("shop.Order$SpurInstantiator").unwrap(), b"first");
        assert!(cache.duplicates().is_empty());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn racing_writes_of_one_name_record_one_duplicate() {
        let diagnostics = Arc::new(DiagnosticSink::new());
        let cache = ArtifactCache::new(RecordingSink::default(), WriteMode::Validate)
            .with_diagnostics(Arc::clone(&diagnostics));

        let results: Vec<Result<(), CacheError>> = std::thread::scope(|s| {
            let first = s.spawn(|| cache.write("shop.Order$SpurInstantiator", b"left"));
            let second = s.spawn(|| cache.write("shop/Order$SpurInstantiator", b"right"));
            vec![first.join().unwrap(), second.join().unwrap()]
        });

        let duplicates = results
            .iter()
            .filter(|r| matches!(r, Err(CacheError::DuplicateArtifactWrite { .. })))
            .count();
        assert_eq!(duplicates, 1);
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert_eq!(cache.duplicates().len(), 1);
        assert_eq!(diagnostics.error_count(), 1);
        assert_eq!(cache.sink().writes.lock().len(), 2);

        let payload = cache.read("shop.Order$SpurInstantiator").unwrap();
        assert!(&*payload == b"left" || &*payload == b"right");
    }

    #[test]
    fn unknown_name_is_not_found() {
        let cache = ArtifactCache::new(NullSink, WriteMode::Validate);
        assert!(cache.read("shop.Order$SpurInstantiator").is_none());
        assert!(!cache.contains("shop/Order$SpurInstantiator"));
        assert!(cache.is_empty());
    }

    #[test]
    fn read_accepts_both_spellings() {
        let cache = ArtifactCache::new(NullSink, WriteMode::Validate);
        cache
            .write("shop/model/Order$SpurInstantiator", b"payload")
            .unwrap();

        assert_eq!(
            &*cache.read("shop.model.Order$SpurInstantiator").unwrap(),
            b"payload"
        );
        assert_eq!(
            &*cache.read("shop/model/Order$SpurInstantiator").unwrap(),
            b"payload"
        );
    }

    #[test]
    fn write_is_forwarded_unchanged() {
        let cache = ArtifactCache::new(RecordingSink::default(), WriteMode::Release);
        cache.write("shop.Order$SpurInstantiator", b"abc").unwrap();

        let writes = cache.sink().writes.lock();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].0.as_str(), "shop/Order$SpurInstantiator");
        assert_eq!(writes[0].1, b"abc");
    }

    #[test]
    fn duplicate_write_fails_in_validation_mode_but_is_kept() {
        let diagnostics = Arc::new(DiagnosticSink::new());
        let cache = ArtifactCache::new(RecordingSink::default(), WriteMode::Validate)
            .with_diagnostics(Arc::clone(&diagnostics));

        cache.write("shop.Order$SpurInstantiator", b"first").unwrap();
        let err = cache
            .write("shop/Order$SpurInstantiator", b"second")
            .unwrap_err();

        assert!(matches!(err, CacheError::DuplicateArtifactWrite { .. }));
        assert_eq!(&*cache.read("shop.Order$SpurInstantiator").unwrap(), b"second");
        assert_eq!(cache.sink().writes.lock().len(), 2);
        assert_eq!(cache.duplicates().len(), 1);
        assert!(diagnostics.has_errors());
        let diags = diagnostics.diagnostics();
        assert!(diags[0].notes[0].contains("differ"));
    }

    #[test]
    fn duplicate_write_is_a_warning_in_release_mode() {
        let diagnostics = Arc::new(DiagnosticSink::new());
        let cache = ArtifactCache::new(NullSink, WriteMode::Release)
            .with_diagnostics(Arc::clone(&diagnostics));

        cache.write("shop.Order$SpurInstantiator", b"same").unwrap();
        cache.write("shop.Order$SpurInstantiator", b"same").unwrap();

        assert!(!diagnostics.has_errors());
        let diags = diagnostics.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert!(diags[0].notes[0].contains("identical"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn concurrent_writes_of_distinct_names() {
        let cache = ArtifactCache::new(RecordingSink::default(), WriteMode::Validate);
        std::thread::scope(|s| {
            for i in 0..16 {
                let cache = &cache;
                s.spawn(move || {
                    let name = format!("shop.Type{i}$SpurInstantiator");
                    cache.write(&name, name.as_bytes()).unwrap();
                });
            }
        });

        assert_eq!(cache.len(), 16);
        assert_eq!(cache.sink().writes.lock().len(), 16);
        for i in 0..16 {
            let name = format!("shop.Type{i}$SpurInstantiator");
            assert_eq!(&*cache.read(&name).unwrap(), name.as_bytes());
        }
        assert!(cache.duplicates().is_empty());
    }

    #[test]
    fn manifest_lists_every_artifact() {
        let cache = ArtifactCache::new(NullSink, WriteMode::Validate);
        cache.write("shop.Order$SpurInstantiator", b"a").unwrap();
        cache.write("shop.Order$SpurAccessor", b"bb").unwrap();

        let manifest = cache.manifest("0.1.0");
        assert_eq!(manifest.artifacts.len(), 2);
        let entry = &manifest.artifacts[&ArtifactName::new("shop.Order$SpurAccessor")];
        assert_eq!(entry.len, 2);
    }

    #[test]
    fn names_are_sorted() {
        let cache = ArtifactCache::new(NullSink, WriteMode::Validate);
        cache.write("shop.Zone$SpurInstantiator", b"z").unwrap();
        cache.write("shop.Area$SpurInstantiator", b"a").unwrap();
        let names = cache.names();
        assert_eq!(names[0].as_str(), "shop/Area$SpurInstantiator");
        assert_eq!(names[1].as_str(), "shop/Zone$SpurInstantiator");
    }
}

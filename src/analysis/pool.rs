//! Bounded worker pool for per-document section extraction.

use crossbeam_channel::unbounded;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::store::DocumentStore;
use crate::error::{Error, Result};
use crate::model::DocumentSections;
use crate::sections::SectionSegmenter;

/// Runs section extraction for many documents on a fixed number of threads.
pub struct ExtractionPool {
    pool: ThreadPool,
}

impl ExtractionPool {
    /// Build a pool with `workers` threads.
    pub fn new(workers: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .thread_name(|i| format!("pdfsense-extract-{}", i))
            .build()
            .map_err(|e| Error::Other(format!("Failed to build worker pool: {}", e)))?;
        Ok(Self { pool })
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Extract the sections of every document.
    ///
    /// Each document is opened and segmented by one task. `on_done` runs on
    /// the calling thread as results arrive, in completion order. The
    /// returned list follows the order of `filenames`.
    pub fn extract<S, F>(
        &self,
        store: &S,
        segmenter: &SectionSegmenter,
        filenames: &[String],
        mut on_done: F,
    ) -> Vec<DocumentSections>
    where
        S: DocumentStore + ?Sized,
        F: FnMut(&DocumentSections),
    {
        let (tx, rx) = unbounded();
        let mut results: Vec<(usize, DocumentSections)> = Vec::with_capacity(filenames.len());

        self.pool.in_place_scope(|scope| {
            for (index, filename) in filenames.iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move |_| {
                    let sections = extract_document(store, segmenter, filename);
                    // The receiver outlives every task.
                    let _ = tx.send((index, sections));
                });
            }
            drop(tx);

            for (index, sections) in rx.iter() {
                on_done(&sections);
                results.push((index, sections));
            }
        });

        results.sort_by_key(|(index, _)| *index);
        results.into_iter().map(|(_, sections)| sections).collect()
    }
}

/// Open and segment one document; failures yield zero sections.
fn extract_document<S: DocumentStore + ?Sized>(
    store: &S,
    segmenter: &SectionSegmenter,
    filename: &str,
) -> DocumentSections {
    match store.open(filename) {
        Ok(source) => {
            let sections = segmenter.extract(source.as_ref());
            log::debug!("{}: {} candidate sections", filename, sections.len());
            DocumentSections {
                document: filename.to_string(),
                sections,
            }
        }
        Err(e) => {
            log::warn!("Skipping {}: {}", filename, e);
            DocumentSections::empty(filename)
        }
    }
}

//! Named-raster session: the store, a message sink, and a random source.
//!
//! Every method reports locally recoverable problems (missing names, bad
//! arguments, unreadable files, unsupported conversions) through the sink and
//! returns `Ok(())`, so a batch keeps going past a bad step. The only error
//! that comes back to the caller is [`EditError::Transmission`], raised when
//! the sink itself fails.
//!
//! When an operation rejects its parameters, the unmodified source raster is
//! stored under the destination name.
use crate::config::BatchStep;
use crate::error::EditError;
use crate::histogram::Histogram;
use crate::image::io::{load_raster, save_raster, write_json_file};
use crate::image::Raster;
use crate::message::MessageSink;
use crate::ops::{Masked, Operation};
use crate::store::RasterStore;
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

const MASK_MISSING: &str = "Unable to locate the specified masked image";

#[derive(Debug)]
pub struct Session<S, R = StdRng> {
    store: RasterStore,
    sink: S,
    rng: R,
}

impl<S: MessageSink> Session<S, StdRng> {
    /// Session whose mosaic seeds come from operating-system entropy.
    pub fn new(sink: S) -> Self {
        Self::with_rng(sink, StdRng::from_os_rng())
    }

    /// Session with a reproducible random source.
    pub fn with_seed(sink: S, seed: u64) -> Self {
        Self::with_rng(sink, StdRng::seed_from_u64(seed))
    }
}

impl<S: MessageSink, R: Rng> Session<S, R> {
    pub fn with_rng(sink: S, rng: R) -> Self {
        Self {
            store: RasterStore::new(),
            sink,
            rng,
        }
    }

    pub fn store(&self) -> &RasterStore {
        &self.store
    }

    pub fn get(&self, name: &str) -> Option<&Raster> {
        self.store.get(name)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (RasterStore, S) {
        (self.store, self.sink)
    }

    /// Store a raster obtained elsewhere.
    pub fn insert(&mut self, name: impl Into<String>, raster: Raster) {
        self.store.insert(name, raster);
    }

    /// Read `path` (PPM or a compressed format) and store it as `name`.
    pub fn load(&mut self, path: impl AsRef<Path>, name: &str) -> Result<(), EditError> {
        match load_raster(path) {
            Ok(raster) => {
                debug!(
                    "Session::load stored '{name}' ({}x{})",
                    raster.width(),
                    raster.height()
                );
                self.store.insert(name, raster);
                Ok(())
            }
            Err(err) => self.recover(err),
        }
    }

    /// Write the raster stored as `name` to `path`.
    pub fn save(&mut self, name: &str, path: impl AsRef<Path>) -> Result<(), EditError> {
        let Some(raster) = self.store.get(name) else {
            return self.report_missing(name);
        };
        match save_raster(raster, path) {
            Ok(()) => Ok(()),
            Err(err) => self.recover(err),
        }
    }

    /// Store the greyscale stencil of `source` as `dest`.
    pub fn mask(&mut self, source: &str, dest: &str) -> Result<(), EditError> {
        self.apply(&Operation::greyscale(), source, dest, None)
    }

    /// Apply `op` to `source` and store the result as `dest`. With `mask`,
    /// the stencil is derived from the raster stored under that name.
    pub fn apply(
        &mut self,
        op: &Operation,
        source: &str,
        dest: &str,
        mask: Option<&str>,
    ) -> Result<(), EditError> {
        let outcome = {
            let Some(target) = self.store.get(source) else {
                return self.report_missing(source);
            };
            let result = match mask {
                Some(mask_name) => {
                    let Some(mask_source) = self.store.get(mask_name) else {
                        return self.report(MASK_MISSING);
                    };
                    Masked::new(op.clone(), mask_source).apply_with_rng(target, &mut self.rng)
                }
                None => op.apply_with_rng(target, &mut self.rng),
            };
            match result {
                Ok(raster) => Ok(raster),
                Err(err @ EditError::Parameter { .. }) => Err((err, Some(target.clone()))),
                Err(err) => Err((err, None)),
            }
        };
        match outcome {
            Ok(raster) => {
                debug!("Session::apply {} '{source}' -> '{dest}'", op.name());
                self.store.insert(dest, raster);
                Ok(())
            }
            Err((err, unchanged)) => {
                if let Some(raster) = unchanged {
                    self.store.insert(dest, raster);
                }
                self.recover(err)
            }
        }
    }

    /// Histogram of the raster stored as `name`.
    pub fn histogram(&mut self, name: &str) -> Result<Option<Histogram>, EditError> {
        match self.store.get(name) {
            Some(raster) => Ok(Some(Histogram::from_raster(raster))),
            None => self.report_missing(name).map(|()| None),
        }
    }

    /// Run one batch step.
    pub fn run_step(&mut self, step: &BatchStep) -> Result<(), EditError> {
        match step {
            BatchStep::Load { path, name } => self.load(path, name),
            BatchStep::Save { name, path } => self.save(name, path),
            BatchStep::Histogram { name, path } => match self.histogram(name)? {
                Some(histogram) => match write_json_file(path, &histogram) {
                    Ok(()) => Ok(()),
                    Err(err) => self.recover(err),
                },
                None => Ok(()),
            },
            BatchStep::Mask { source, dest } => self.mask(source, dest),
            BatchStep::Apply {
                operation,
                args,
                source,
                dest,
                mask,
            } => match Operation::parse(operation, args) {
                Ok(op) => self.apply(&op, source, dest, mask.as_deref()),
                Err(err @ EditError::Parameter { .. }) => match self.store.get(source) {
                    Some(raster) => {
                        let unchanged = raster.clone();
                        self.store.insert(dest.as_str(), unchanged);
                        self.recover(err)
                    }
                    None => self.report_missing(source),
                },
                Err(err) => self.recover(err),
            },
        }
    }

    /// Run every step in order; stops only when the sink fails.
    pub fn run_batch(&mut self, steps: &[BatchStep]) -> Result<(), EditError> {
        for (index, step) in steps.iter().enumerate() {
            debug!("Session::run_batch step {index}: {step:?}");
            self.run_step(step)?;
        }
        Ok(())
    }

    fn recover(&mut self, err: EditError) -> Result<(), EditError> {
        if !err.is_recoverable() {
            return Err(err);
        }
        debug!("Session recovered from: {err}");
        self.report(&err.to_string())
    }

    fn report_missing(&mut self, name: &str) -> Result<(), EditError> {
        self.report(&format!(
            "Cannot process '{name}': no image with that name has been stored"
        ))
    }

    fn report(&mut self, message: &str) -> Result<(), EditError> {
        self.sink.render_message(message)?;
        Ok(())
    }
}

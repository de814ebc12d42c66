//! The generation invoker.
//!
//! The invoker owns a [`GenerationConfig`] and hands it, unchanged, to one
//! [`IdlGenerator`] call. It does no filesystem work of its own and does not
//! retry; any generator error comes back as [`GenerationFailed`].

use log::{error, info};

use crate::{
    config::GenerationConfig,
    error::{GenerationFailed, GeneratorResult},
};

/// A backend that turns a program into an IDL file.
pub trait IdlGenerator {
    /// Generate the IDL described by `config`.
    ///
    /// # Errors
    ///
    /// Returns a [`GeneratorError`](crate::GeneratorError) describing the
    /// first step that failed.
    fn generate(&self, config: &GenerationConfig) -> GeneratorResult<()>;
}

impl<G: IdlGenerator + ?Sized> IdlGenerator for &G {
    fn generate(&self, config: &GenerationConfig) -> GeneratorResult<()> {
        (**self).generate(config)
    }
}

/// Runs a single IDL generation.
#[derive(Debug)]
pub struct Invoker<G> {
    config: GenerationConfig,
    generator: G,
}

impl<G: IdlGenerator> Invoker<G> {
    /// Pair a config with the generator that will consume it.
    pub fn new(config: GenerationConfig, generator: G) -> Self {
        Self { config, generator }
    }

    /// The config that will be passed to the generator.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Call the generator once. Consumes the invoker together with its config.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationFailed`] wrapping the generator's error.
    pub fn run(self) -> Result<(), GenerationFailed> {
        info!(
            "Running {:?} for {} ({})",
            self.config.generator(),
            self.config.program_name(),
            self.config.program_id()
        );

        match self.generator.generate(&self.config) {
            Ok(()) => {
                info!("IDL generation completed");
                Ok(())
            }
            Err(err) => {
                error!("IDL generation failed: {}", err);
                Err(GenerationFailed::from(err))
            }
        }
    }
}

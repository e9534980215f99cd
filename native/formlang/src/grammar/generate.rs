//! Random sentence generation.

use crate::grammar::{Grammar, Production};
use log::debug;
use rand::Rng;

/// Limits and bias for [`Grammar::generate_sentence_with`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    /// Derivation steps after which generation gives up.
    pub max_steps: usize,
    /// Step count after which terminating productions are preferred.
    pub bias_after: usize,
    /// Probability of taking a terminating production once biased.
    pub bias_probability: f64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            max_steps: 60,
            bias_after: 20,
            bias_probability: 0.65,
        }
    }
}

impl Grammar {
    /// Derive a random sentence with the default [`GenerationConfig`].
    ///
    /// Returns `None` when the derivation runs past the step limit or reaches
    /// a non-terminal without productions; callers may simply retry.
    pub fn generate_sentence<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        self.generate_sentence_with(&GenerationConfig::default(), rng)
    }

    /// Derive a random sentence under `config`.
    ///
    /// Each step picks one production of the current non-terminal uniformly.
    /// Past `bias_after` steps a terminating production, when one exists, is
    /// taken with probability `bias_probability`.
    pub fn generate_sentence_with<R: Rng + ?Sized>(
        &self,
        config: &GenerationConfig,
        rng: &mut R,
    ) -> Option<String> {
        let mut current = self.start_symbol();
        let mut sentence = String::new();
        let mut steps = 0;

        loop {
            steps += 1;
            if steps > config.max_steps {
                debug!("giving up on {sentence:?} after {} steps", config.max_steps);
                return None;
            }

            let options = self.productions_of(current);
            if options.is_empty() {
                debug!("dead end at `{current}` after {sentence:?}");
                return None;
            }

            let chosen = choose_with_bias(options, steps > config.bias_after, config, rng);
            sentence.push(chosen.terminal());
            match chosen.next() {
                Some(next) => current = next,
                None => break,
            }
        }

        debug!("generated {sentence:?} in {steps} steps");
        Some(sentence)
    }
}

/// `options` must not be empty.
fn choose_with_bias<'a, R: Rng + ?Sized>(
    options: &'a [Production],
    prefer_end: bool,
    config: &GenerationConfig,
    rng: &mut R,
) -> &'a Production {
    if prefer_end {
        let endings: Vec<&Production> = options.iter().filter(|p| p.is_terminating()).collect();
        if !endings.is_empty() && rng.r#gen::<f64>() < config.bias_probability {
            return endings[rng.gen_range(0..endings.len())];
        }
    }
    &options[rng.gen_range(0..options.len())]
}

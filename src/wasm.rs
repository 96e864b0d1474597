//! WebAssembly bindings for Humanizer.
//!
//! This module provides JavaScript-friendly bindings for the pipeline.

use serde::Deserialize;
use wasm_bindgen::prelude::*;

use crate::nlp::{LanguageBackend, NlpError, RuleBasedBackend, TaggedToken};
use crate::{Humanizer, Options, Tone};

/// JavaScript-friendly options struct.
///
/// All fields are optional and use camelCase naming for JavaScript conventions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JsOptions {
    /// Tone name: "formal", "casual", "enthusiastic" or "authoritative"
    /// (default: "casual"). Unknown names skip the tone pass.
    pub tone: Option<String>,

    /// Language code passed to the tagger (default: "EN").
    pub language: Option<String>,

    /// Seed for reproducible sentence merging.
    pub seed: Option<u64>,

    /// Probability of each sentence-merge coin toss (default: 0.5).
    pub merge_probability: Option<f64>,
}

impl JsOptions {
    fn to_options(&self) -> Options {
        let mut opts = Options::default();

        if let Some(ref v) = self.tone {
            opts.tone = v.parse::<Tone>().ok();
        }
        if let Some(ref v) = self.language {
            opts.language = v.clone();
        }
        if let Some(v) = self.merge_probability
            && (0.0..=1.0).contains(&v)
        {
            opts.merge_probability = v;
        }

        opts
    }
}

fn parse_options(options: JsValue) -> Result<JsOptions, JsError> {
    if options.is_undefined() || options.is_null() {
        Ok(JsOptions::default())
    } else {
        serde_wasm_bindgen::from_value(options).map_err(|e| JsError::new(&e.to_string()))
    }
}

fn run<B: LanguageBackend>(
    input: &str,
    js_opts: &JsOptions,
    backend: B,
) -> Result<String, JsError> {
    let opts = js_opts.to_options();
    let result = match js_opts.seed {
        Some(seed) => {
            use rand::SeedableRng;
            let rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);
            Humanizer::with_parts(backend, rng, opts).humanize(input)
        }
        None => Humanizer::with_parts(backend, rand::rng(), opts).humanize(input),
    };
    result.map_err(|e| JsError::new(&e.to_string()))
}

/// Humanize text using the built-in sentence splitter and tagger.
///
/// # Arguments
///
/// * `input` - The text to humanize
/// * `options` - Optional configuration object
///
/// # Returns
///
/// The humanized text.
#[wasm_bindgen]
pub fn humanize(input: &str, options: JsValue) -> Result<String, JsError> {
    let js_opts = parse_options(options)?;
    run(input, &js_opts, RuleBasedBackend)
}

/// Tags sentences by calling back into JavaScript, segmenting with the
/// built-in splitter.
struct JsTagger {
    tagger: js_sys::Function,
}

impl LanguageBackend for JsTagger {
    fn segment_sentences(&self, text: &str) -> Result<Vec<String>, NlpError> {
        RuleBasedBackend.segment_sentences(text)
    }

    fn tag_tokens(&self, sentence: &str, language: &str) -> Result<Vec<TaggedToken>, NlpError> {
        let failed = |reason: String| NlpError::TaggingFailed {
            sentence: sentence.to_string(),
            reason,
        };

        let value = self
            .tagger
            .call2(
                &JsValue::NULL,
                &JsValue::from_str(sentence),
                &JsValue::from_str(language),
            )
            .map_err(|e| failed(format!("{:?}", e)))?;

        if !js_sys::Array::is_array(&value) {
            return Err(failed("tagger did not return an array".to_string()));
        }

        js_sys::Array::from(&value)
            .iter()
            .map(|token| {
                token
                    .as_string()
                    .map(|t| TaggedToken::new(t, ""))
                    .ok_or_else(|| failed("token is not a string".to_string()))
            })
            .collect()
    }
}

/// Humanize text with a JavaScript tagging callback.
///
/// # Arguments
///
/// * `input` - The text to humanize
/// * `options` - Optional configuration object
/// * `tagger` - JavaScript function `(sentence: string, language: string) => string[]`
///   returning the tokens of the sentence. A thrown exception fails the call.
///
/// # Returns
///
/// The humanized text.
#[wasm_bindgen(js_name = humanizeWithTagger)]
pub fn humanize_with_tagger(
    input: &str,
    options: JsValue,
    tagger: js_sys::Function,
) -> Result<String, JsError> {
    let js_opts = parse_options(options)?;
    run(input, &js_opts, JsTagger { tagger })
}

//! Image generation client covering the three Shard tiers.
//!
//! Each tier is a distinct endpoint with its own closed payload shape:
//! the base `sd1x` tier, the high-resolution `sdxl` tier (adds an
//! upscale flag and different default model/ratio), and the fast
//! `sdxl-turbo` tier (prompt and negative prompt only).

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ShardError;
use crate::http;
use crate::model::{ImageOptionsCatalog, ImageResult, Media};
use crate::options::TransportOptions;

const SD1X_COMPLETIONS_PATH: &str = "/v1/sd1x/completions";
const SD1X_MODELS_PATH: &str = "/v1/sd1x/models";
const SDXL_COMPLETIONS_PATH: &str = "/v1/sdxl/completions";
const SDXL_MODELS_PATH: &str = "/v1/sdxl/models";
const TURBO_COMPLETIONS_PATH: &str = "/v1/sdxl-turbo/completions";

const DEFAULT_SAMPLER: &str = "DPM++ SDE Karras";
const DEFAULT_CFG: u32 = 4;
const DEFAULT_STEPS: u32 = 15;
const SD1X_RATIO: &str = "square";
const SD1X_MODEL: &str = "DREAMSHAPER_8";
const SDXL_RATIO: &str = "square_hd";
const SDXL_MODEL: &str = "SDXL_1_0";

/// Exclusive upper bound of the default seed draw.
const SEED_SPAN: u64 = 10_000_000_000;

/// Parameters for the base (`sd1x`) tier. Unset fields take the tier
/// defaults at payload construction time.
#[derive(Debug, Clone, Default)]
pub struct Sd1xParams {
    pub sampler: Option<String>,
    pub ratio: Option<String>,
    pub model: Option<String>,
    pub cfg: Option<u32>,
    pub steps: Option<u32>,
    pub negative_prompt: Option<String>,
    /// Fresh random draw in [0, 10^10) per call when unset.
    pub seed: Option<u64>,
    pub style: Option<String>,
    /// Ask the endpoint for an inline base64 payload instead of a URL.
    pub base64_output: Option<bool>,
}

impl Sd1xParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampler.
    pub fn with_sampler(mut self, sampler: impl Into<String>) -> Self {
        self.sampler = Some(sampler.into());
        self
    }

    /// Set the aspect ratio.
    pub fn with_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.ratio = Some(ratio.into());
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the guidance scale.
    pub fn with_cfg(mut self, cfg: u32) -> Self {
        self.cfg = Some(cfg);
        self
    }

    /// Set the step count.
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Set the negative prompt.
    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative_prompt.into());
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Request an inline base64 payload instead of a hosted URL.
    pub fn with_base64_output(mut self, base64_output: bool) -> Self {
        self.base64_output = Some(base64_output);
        self
    }
}

/// Parameters for the high-resolution (`sdxl`) tier.
#[derive(Debug, Clone, Default)]
pub struct SdxlParams {
    pub sampler: Option<String>,
    pub ratio: Option<String>,
    pub model: Option<String>,
    pub cfg: Option<u32>,
    pub steps: Option<u32>,
    pub negative_prompt: Option<String>,
    /// Fresh random draw in [0, 10^10) per call when unset.
    pub seed: Option<u64>,
    pub style: Option<String>,
    pub base64_output: Option<bool>,
    pub upscale: Option<bool>,
}

impl SdxlParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sampler.
    pub fn with_sampler(mut self, sampler: impl Into<String>) -> Self {
        self.sampler = Some(sampler.into());
        self
    }

    /// Set the aspect ratio.
    pub fn with_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.ratio = Some(ratio.into());
        self
    }

    /// Set the model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the guidance scale.
    pub fn with_cfg(mut self, cfg: u32) -> Self {
        self.cfg = Some(cfg);
        self
    }

    /// Set the step count.
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = Some(steps);
        self
    }

    /// Set the negative prompt.
    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative_prompt.into());
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the style.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    /// Request an inline base64 payload instead of a hosted URL.
    pub fn with_base64_output(mut self, base64_output: bool) -> Self {
        self.base64_output = Some(base64_output);
        self
    }

    /// Ask the endpoint to upscale the result.
    pub fn with_upscale(mut self, upscale: bool) -> Self {
        self.upscale = Some(upscale);
        self
    }
}

/// Asynchronous image client.
#[derive(Debug, Clone)]
pub struct Image {
    options: TransportOptions,
}

impl Image {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    /// Get a reference to the transport options.
    pub fn transport_options(&self) -> &TransportOptions {
        &self.options
    }

    /// Generate an image on the base tier.
    pub async fn completions(
        &self,
        prompt: &str,
        params: &Sd1xParams,
    ) -> Result<ImageResult, ShardError> {
        let payload = sd1x_payload(&self.options, prompt, params)?;
        let response: ImageResponse =
            http::post_json(&self.options, SD1X_COMPLETIONS_PATH, &payload).await?;
        Ok(response.into())
    }

    /// Generate an image on the high-resolution tier.
    pub async fn sdxl_completions(
        &self,
        prompt: &str,
        params: &SdxlParams,
    ) -> Result<ImageResult, ShardError> {
        let payload = sdxl_payload(&self.options, prompt, params)?;
        let response: ImageResponse =
            http::post_json(&self.options, SDXL_COMPLETIONS_PATH, &payload).await?;
        Ok(response.into())
    }

    /// Generate an image on the fast tier. Only the prompt and an
    /// optional negative prompt are accepted.
    pub async fn turbo_completions(
        &self,
        prompt: &str,
        negative_prompt: Option<&str>,
    ) -> Result<ImageResult, ShardError> {
        let payload = turbo_payload(&self.options, prompt, negative_prompt)?;
        let response: ImageResponse =
            http::post_json(&self.options, TURBO_COMPLETIONS_PATH, &payload).await?;
        Ok(response.into())
    }

    /// Fetch the base tier's catalog of valid models, ratios and
    /// samplers, with its upscale flag.
    pub async fn options(&self) -> Result<ImageOptionsCatalog, ShardError> {
        http::get_json(&self.options, SD1X_MODELS_PATH).await
    }

    /// Fetch the high-resolution tier's catalog; carries a style list
    /// instead of the upscale flag.
    pub async fn sdxl_options(&self) -> Result<ImageOptionsCatalog, ShardError> {
        http::get_json(&self.options, SDXL_MODELS_PATH).await
    }
}

/// Blocking image client.
#[derive(Debug, Clone)]
pub struct BlockingImage {
    options: TransportOptions,
}

impl BlockingImage {
    pub fn new(options: TransportOptions) -> Self {
        Self { options }
    }

    /// Get a reference to the transport options.
    pub fn transport_options(&self) -> &TransportOptions {
        &self.options
    }

    /// Generate an image on the base tier.
    pub fn completions(
        &self,
        prompt: &str,
        params: &Sd1xParams,
    ) -> Result<ImageResult, ShardError> {
        let payload = sd1x_payload(&self.options, prompt, params)?;
        let response: ImageResponse =
            http::post_json_blocking(&self.options, SD1X_COMPLETIONS_PATH, &payload)?;
        Ok(response.into())
    }

    /// Generate an image on the high-resolution tier.
    pub fn sdxl_completions(
        &self,
        prompt: &str,
        params: &SdxlParams,
    ) -> Result<ImageResult, ShardError> {
        let payload = sdxl_payload(&self.options, prompt, params)?;
        let response: ImageResponse =
            http::post_json_blocking(&self.options, SDXL_COMPLETIONS_PATH, &payload)?;
        Ok(response.into())
    }

    /// Generate an image on the fast tier.
    pub fn turbo_completions(
        &self,
        prompt: &str,
        negative_prompt: Option<&str>,
    ) -> Result<ImageResult, ShardError> {
        let payload = turbo_payload(&self.options, prompt, negative_prompt)?;
        let response: ImageResponse =
            http::post_json_blocking(&self.options, TURBO_COMPLETIONS_PATH, &payload)?;
        Ok(response.into())
    }

    /// Fetch the base tier's option catalog.
    pub fn options(&self) -> Result<ImageOptionsCatalog, ShardError> {
        http::get_json_blocking(&self.options, SD1X_MODELS_PATH)
    }

    /// Fetch the high-resolution tier's option catalog.
    pub fn sdxl_options(&self) -> Result<ImageOptionsCatalog, ShardError> {
        http::get_json_blocking(&self.options, SDXL_MODELS_PATH)
    }
}

// --- Payload shaping (shared by both execution modes) ---

#[derive(Debug, Serialize)]
struct Sd1xPayload {
    prompt: String,
    sampler: String,
    ratio: String,
    model: String,
    cfg: u32,
    steps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<String>,
    seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    #[serde(rename = "base64", skip_serializing_if = "Option::is_none")]
    base64_output: Option<bool>,
}

#[derive(Debug, Serialize)]
struct SdxlPayload {
    prompt: String,
    sampler: String,
    ratio: String,
    model: String,
    cfg: u32,
    steps: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<String>,
    seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    #[serde(rename = "base64", skip_serializing_if = "Option::is_none")]
    base64_output: Option<bool>,
    upscale: bool,
}

#[derive(Debug, Serialize)]
struct TurboPayload {
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<String>,
}

/// Draw a default seed. Drawn per call, never cached.
fn fresh_seed() -> u64 {
    rand::thread_rng().gen_range(0..SEED_SPAN)
}

fn validate(options: &TransportOptions, prompt: &str) -> Result<(), ShardError> {
    options.require_credential()?;
    if prompt.trim().is_empty() {
        return Err(ShardError::MissingInput("prompt"));
    }
    Ok(())
}

fn sd1x_payload(
    options: &TransportOptions,
    prompt: &str,
    params: &Sd1xParams,
) -> Result<Sd1xPayload, ShardError> {
    validate(options, prompt)?;

    Ok(Sd1xPayload {
        prompt: prompt.to_string(),
        sampler: params
            .sampler
            .clone()
            .unwrap_or_else(|| DEFAULT_SAMPLER.to_string()),
        ratio: params.ratio.clone().unwrap_or_else(|| SD1X_RATIO.to_string()),
        model: params.model.clone().unwrap_or_else(|| SD1X_MODEL.to_string()),
        cfg: params.cfg.unwrap_or(DEFAULT_CFG),
        steps: params.steps.unwrap_or(DEFAULT_STEPS),
        negative_prompt: params.negative_prompt.clone(),
        seed: params.seed.unwrap_or_else(fresh_seed),
        style: params.style.clone(),
        base64_output: params.base64_output,
    })
}

fn sdxl_payload(
    options: &TransportOptions,
    prompt: &str,
    params: &SdxlParams,
) -> Result<SdxlPayload, ShardError> {
    validate(options, prompt)?;

    Ok(SdxlPayload {
        prompt: prompt.to_string(),
        sampler: params
            .sampler
            .clone()
            .unwrap_or_else(|| DEFAULT_SAMPLER.to_string()),
        ratio: params.ratio.clone().unwrap_or_else(|| SDXL_RATIO.to_string()),
        model: params.model.clone().unwrap_or_else(|| SDXL_MODEL.to_string()),
        cfg: params.cfg.unwrap_or(DEFAULT_CFG),
        steps: params.steps.unwrap_or(DEFAULT_STEPS),
        negative_prompt: params.negative_prompt.clone(),
        seed: params.seed.unwrap_or_else(fresh_seed),
        style: params.style.clone(),
        base64_output: params.base64_output,
        upscale: params.upscale.unwrap_or(false),
    })
}

fn turbo_payload(
    options: &TransportOptions,
    prompt: &str,
    negative_prompt: Option<&str>,
) -> Result<TurboPayload, ShardError> {
    validate(options, prompt)?;

    Ok(TurboPayload {
        prompt: prompt.to_string(),
        negative_prompt: negative_prompt.map(str::to_string),
    })
}

// --- Wire types ---

#[derive(Debug, Deserialize)]
struct ImageResponse {
    image: Media,
    #[serde(rename = "generation-time")]
    generation_time: f64,
    #[serde(rename = "Warning!")]
    warning: Option<String>,
    info: Option<Value>,
}

impl From<ImageResponse> for ImageResult {
    fn from(response: ImageResponse) -> Self {
        ImageResult {
            image: response.image,
            generation_time: response.generation_time,
            warning: response.warning,
            info: response.info,
        }
    }
}

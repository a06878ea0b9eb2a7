use crate::constants::{ANALYSER_FFT_SIZE, AUDIBLE_GAIN, DRONE_HZ, GAIN_RAMP_SEC};
use field_core::Signals;
use web_sys as web;

#[inline]
fn js_err(label: &str, e: wasm_bindgen::JsValue) -> anyhow::Error {
    anyhow::anyhow!("{label}: {:?}", e)
}

/// Sine drone routed through an analyser whose time-domain frames drive the field.
pub struct AudioTap {
    ctx: web::AudioContext,
    osc: web::OscillatorNode,
    analyser: web::AnalyserNode,
    master: web::GainNode,
    buf: Vec<f32>,
    audible: bool,
}

impl AudioTap {
    pub fn new() -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| js_err("AudioContext", e))?;

        let analyser = ctx
            .create_analyser()
            .map_err(|e| js_err("AnalyserNode", e))?;
        analyser.set_fft_size(ANALYSER_FFT_SIZE);

        // Master gain starts muted; the analyser still sees the signal.
        let master = ctx.create_gain().map_err(|e| js_err("GainNode", e))?;
        master.gain().set_value(0.0);

        let osc = ctx
            .create_oscillator()
            .map_err(|e| js_err("OscillatorNode", e))?;
        osc.set_type(web::OscillatorType::Sine);
        osc.frequency().set_value(DRONE_HZ);

        osc.connect_with_audio_node(&analyser)
            .map_err(|e| js_err("connect osc", e))?;
        analyser
            .connect_with_audio_node(&master)
            .map_err(|e| js_err("connect analyser", e))?;
        master
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| js_err("connect master", e))?;
        osc.start().map_err(|e| js_err("osc start", e))?;
        _ = ctx.resume();

        let buf = vec![0.0; analyser.frequency_bin_count() as usize];
        log::info!("audio tap ready: {} samples per frame", buf.len());
        Ok(Self {
            ctx,
            osc,
            analyser,
            master,
            buf,
            audible: false,
        })
    }

    /// Copy the latest time-domain frame into `signals`. Bad frames keep the previous sample.
    pub fn read_into(&mut self, signals: &mut Signals) {
        self.analyser.get_float_time_domain_data(&mut self.buf);
        if let Err(e) = signals.push_amplitude(&self.buf) {
            log::debug!("amplitude frame dropped: {e}");
        }
    }

    /// Fade the master gain in or out.
    pub fn set_audible(&mut self, audible: bool) {
        _ = self.ctx.resume();
        let now = self.ctx.current_time();
        let gain = self.master.gain();
        let target = if audible { AUDIBLE_GAIN } else { 0.0 };
        _ = gain.cancel_scheduled_values(now);
        _ = gain.set_value_at_time(gain.value(), now);
        _ = gain.linear_ramp_to_value_at_time(target, now + GAIN_RAMP_SEC);
        self.audible = audible;
    }

    #[inline]
    pub fn is_audible(&self) -> bool {
        self.audible
    }

    /// Resume after a user gesture; browsers start contexts suspended.
    pub fn resume(&self) {
        if self.ctx.state() == web::AudioContextState::Suspended {
            _ = self.ctx.resume();
        }
    }

    pub fn close(&self) {
        _ = self.osc.stop();
        _ = self.ctx.close();
    }
}

impl Drop for AudioTap {
    fn drop(&mut self) {
        self.close();
    }
}

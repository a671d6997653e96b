use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

use anyhow::Result;
use bevy_ecs::system::Resource;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, SizedSample};
use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, error};

use crate::config::AudioConfig;

// Sound effects that can be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    Move,
    Rotate,
    SoftDrop,
    HardDrop,
    Lock,
    LineClear,
    FourLines,
    LevelUp,
    GameOver,
    CardFlip,
    CardMatch,
    CardMismatch,
    Win,
}

// Command to control the audio thread
enum AudioCommand {
    PlaySound(SoundEffect),
    PlayMusic(bool), // true to start, false to stop
    SetVolume(f32),  // 0.0 to 1.0
}

// Audio output collaborator. Without a device every call is a silent no-op.
#[derive(Resource)]
pub struct AudioState {
    sender: Option<Sender<AudioCommand>>,
    available: Arc<AtomicBool>,
    music_enabled: bool,
    sound_enabled: bool,
    volume: f32,
}

impl AudioState {
    pub fn new() -> Self {
        Self::from_config(&AudioConfig::default())
    }

    pub fn from_config(config: &AudioConfig) -> Self {
        let (sender, receiver) = bounded(64);
        let available = Arc::new(AtomicBool::new(true));
        let thread_available = Arc::clone(&available);
        let volume = config.volume.clamp(0.0, 1.0);
        let music_enabled = config.music_enabled;

        let spawned = thread::Builder::new()
            .name("audio".into())
            .spawn(move || {
                if let Err(e) = run_audio_thread(&receiver, volume, music_enabled) {
                    error!("Audio thread error: {e}");
                    thread_available.store(false, Ordering::Relaxed);
                }
            });

        let sender = match spawned {
            Ok(_) => Some(sender),
            Err(e) => {
                error!("Could not start audio thread: {e}");
                available.store(false, Ordering::Relaxed);
                None
            }
        };

        Self {
            sender,
            available,
            music_enabled,
            sound_enabled: config.sound_enabled,
            volume,
        }
    }

    /// No audio thread at all; used for tests and when audio is unwanted.
    pub fn disabled() -> Self {
        Self {
            sender: None,
            available: Arc::new(AtomicBool::new(false)),
            music_enabled: false,
            sound_enabled: false,
            volume: 0.0,
        }
    }

    pub fn play_sound(&self, effect: SoundEffect) -> bool {
        if !self.sound_enabled {
            return false;
        }
        if let Some(sender) = &self.sender {
            let _ = sender.try_send(AudioCommand::PlaySound(effect));
        }
        true
    }

    pub fn is_audio_available(&self) -> bool {
        self.sender.is_some() && self.available.load(Ordering::Relaxed)
    }

    pub fn is_music_enabled(&self) -> bool {
        self.music_enabled
    }

    pub fn is_sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn toggle_sound(&mut self) {
        self.sound_enabled = !self.sound_enabled;
    }

    pub fn get_volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);

        if let Some(sender) = &self.sender {
            let _ = sender.try_send(AudioCommand::SetVolume(self.volume));
        }
    }

    pub fn toggle_music(&mut self) {
        self.music_enabled = !self.music_enabled;

        if let Some(sender) = &self.sender {
            let _ = sender.try_send(AudioCommand::PlayMusic(self.music_enabled));
        }
    }

    /// Current settings in config form, for writing back to disk.
    pub fn to_config(&self) -> AudioConfig {
        AudioConfig {
            music_enabled: self.music_enabled,
            sound_enabled: self.sound_enabled,
            volume: self.volume,
        }
    }
}

impl Default for AudioState {
    fn default() -> Self {
        Self::new()
    }
}

fn run_audio_thread(
    receiver: &Receiver<AudioCommand>,
    initial_volume: f32,
    initial_music_enabled: bool,
) -> Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| anyhow::anyhow!("No audio output device found"))?;
    let config = device.default_output_config()?;
    debug!("Audio output config: {config:?}");

    let mut volume = initial_volume;
    let mut music_enabled = initial_music_enabled;

    // Effects and settings are forwarded to the stream callback
    let (sound_sender, sound_receiver) = bounded::<SoundEffect>(64);
    let (cmd_sender, cmd_receiver) = bounded::<(bool, f32)>(16);

    let _stream = match config.sample_format() {
        cpal::SampleFormat::F32 => run_audio_stream::<f32>(
            &device,
            &config.into(),
            sound_receiver,
            cmd_receiver,
            volume,
            music_enabled,
        )?,
        cpal::SampleFormat::I16 => run_audio_stream::<i16>(
            &device,
            &config.into(),
            sound_receiver,
            cmd_receiver,
            volume,
            music_enabled,
        )?,
        cpal::SampleFormat::U16 => run_audio_stream::<u16>(
            &device,
            &config.into(),
            sound_receiver,
            cmd_receiver,
            volume,
            music_enabled,
        )?,
        _ => return Err(anyhow::anyhow!("Unsupported audio format")),
    };

    // Runs until every sender is dropped
    while let Ok(command) = receiver.recv() {
        match command {
            AudioCommand::PlaySound(effect) => {
                let _ = sound_sender.try_send(effect);
            }
            AudioCommand::PlayMusic(enabled) => {
                music_enabled = enabled;
                let _ = cmd_sender.try_send((music_enabled, volume));
            }
            AudioCommand::SetVolume(new_volume) => {
                volume = new_volume;
                let _ = cmd_sender.try_send((music_enabled, volume));
            }
        }
    }

    Ok(())
}

fn run_audio_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    sound_receiver: Receiver<SoundEffect>,
    cmd_receiver: Receiver<(bool, f32)>,
    initial_volume: f32,
    initial_music_enabled: bool,
) -> Result<cpal::Stream>
where
    T: SizedSample + FromSample<f32>,
{
    let sample_rate = f64::from(config.sample_rate.0);
    let channels = usize::from(config.channels);

    let mut music_enabled = initial_music_enabled;
    let mut volume = initial_volume;

    // Active effects with their start time
    let mut active_sounds: Vec<(SoundEffect, f64)> = Vec::new();
    let mut current_time = 0.0;

    let mut next_value = move || {
        while let Ok((new_music_enabled, new_volume)) = cmd_receiver.try_recv() {
            music_enabled = new_music_enabled;
            volume = new_volume;
        }

        while let Ok(effect) = sound_receiver.try_recv() {
            active_sounds.push((effect, current_time));
        }

        active_sounds.retain(|(effect, start)| current_time - start <= effect_duration(*effect));

        let mut left = 0.0;
        let mut right = 0.0;
        for (effect, start_time) in &active_sounds {
            let sample = generate_sound_sample(*effect, current_time - start_time);
            left += sample.0;
            right += sample.1;
        }

        if music_enabled {
            let sample = background_sample(current_time);
            left += sample;
            right += sample;
        }

        current_time += 1.0 / sample_rate;

        (
            (left * volume).clamp(-1.0, 1.0),
            (right * volume).clamp(-1.0, 1.0),
        )
    };

    let err_fn = |err| error!("Error in audio stream: {err}");

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(channels) {
                let sample = next_value();
                let left = T::from_sample(sample.0);
                let right = T::from_sample(sample.1);

                for (channel, sample) in frame.iter_mut().enumerate() {
                    *sample = if channel & 1 == 0 { left } else { right };
                }
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok(stream)
}

// Seconds an effect stays in the mix
fn effect_duration(effect: SoundEffect) -> f64 {
    match effect {
        SoundEffect::Move | SoundEffect::Rotate | SoundEffect::CardFlip => 0.05,
        SoundEffect::CardMatch | SoundEffect::CardMismatch => 0.3,
        SoundEffect::SoftDrop | SoundEffect::HardDrop | SoundEffect::Lock => 0.1,
        SoundEffect::LineClear => 0.5,
        SoundEffect::FourLines | SoundEffect::LevelUp | SoundEffect::Win => 1.0,
        SoundEffect::GameOver => 2.0,
    }
}

// Quiet low drone under the effects
#[allow(clippy::cast_possible_truncation)]
fn background_sample(t: f64) -> f32 {
    let t = t as f32;
    let freq = 110.0f32 + (t * 0.1).sin() * 10.0;
    let amp = 0.05f32 * ((t * 0.3).sin() * 0.5 + 0.5);
    (t * freq * std::f32::consts::TAU).sin() * amp
}

// Generate a stereo sample for an effect `t` seconds after it started
#[allow(clippy::cast_possible_truncation)]
pub fn generate_sound_sample(effect: SoundEffect, t: f64) -> (f32, f32) {
    if t > effect_duration(effect) {
        return (0.0, 0.0);
    }
    let t = t as f32;
    let tone = |freq: f32| (t * freq * std::f32::consts::TAU).sin();

    match effect {
        SoundEffect::Move => {
            let sample = tone(220.0) * 0.3;
            (sample, sample)
        }
        SoundEffect::Rotate => {
            let sample = tone(440.0) * 0.3;
            (sample, sample)
        }
        SoundEffect::SoftDrop => {
            let sample = tone(110.0) * 0.3;
            (sample, sample)
        }
        SoundEffect::HardDrop | SoundEffect::Lock => {
            // Thud: decaying low tone with a little noise
            let amp = (0.1 - t).max(0.0) * 5.0;
            let noise = fastrand::f32() * 0.1;
            let sample = (noise + tone(80.0) * 0.2) * amp;
            (sample * 0.8, sample * 1.2)
        }
        SoundEffect::LineClear => {
            // Rising sweep
            let freq = 300.0 + 500.0 * (t * 5.0).min(1.0);
            let amp = if t < 0.2 { 1.0 } else { (0.5 - t).max(0.0) * 2.0 };
            let sample = tone(freq) * amp * 0.3;
            (sample * 1.2, sample * 0.8)
        }
        SoundEffect::FourLines => {
            let freq = arpeggio(t, [440.0, 554.0, 659.0, 880.0], 0.25);
            let sample = tone(freq) * 0.16;
            (sample, sample)
        }
        SoundEffect::LevelUp => {
            let freq = arpeggio(t, [330.0, 392.0, 494.0, 659.0], 0.25);
            let sample = tone(freq) * 0.4;
            (sample, sample)
        }
        SoundEffect::GameOver => {
            // Descending pitch
            let freq = 600.0 - 200.0 * t;
            let amp = (2.0 - t).max(0.0) * 0.5;
            let sample = tone(freq) * amp * 0.4;
            (sample, sample)
        }
        SoundEffect::CardFlip => {
            let sample = tone(660.0) * 0.25;
            (sample, sample)
        }
        SoundEffect::CardMatch => {
            let freq = arpeggio(t, [523.0, 659.0, 784.0, 784.0], 0.1);
            let sample = tone(freq) * 0.3;
            (sample, sample)
        }
        SoundEffect::CardMismatch => {
            // Two low buzzes
            let freq = if t < 0.15 { 196.0 } else { 147.0 };
            let sample = tone(freq) * 0.3;
            (sample, sample)
        }
        SoundEffect::Win => {
            let freq = arpeggio(t, [523.0, 659.0, 784.0, 1047.0], 0.25);
            let sample = tone(freq) * 0.35;
            (sample * 1.1, sample * 0.9)
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn arpeggio(t: f32, notes: [f32; 4], step: f32) -> f32 {
    let index = ((t / step) as usize).min(notes.len() - 1);
    notes[index]
}

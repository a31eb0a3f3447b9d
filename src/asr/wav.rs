use std::io::Cursor;

use hound::{SampleFormat, WavReader};

use super::interface::RecognitionError;

/// Mono 16-bit PCM audio.
#[derive(Debug, Clone, PartialEq)]
pub struct PcmAudio {
    pub sample_rate: u32,
    pub samples: Vec<i16>,
}

impl PcmAudio {
    /// Decode a WAV file, converting any sample format to 16-bit and
    /// averaging channels down to mono.
    pub fn from_wav(bytes: &[u8]) -> Result<Self, RecognitionError> {
        let mut reader = WavReader::new(Cursor::new(bytes))
            .map_err(|e| RecognitionError::InvalidAudio(e.to_string()))?;
        let spec = reader.spec();

        let interleaved: Vec<i16> = match spec.sample_format {
            SampleFormat::Int => reader
                .samples::<i32>()
                .map(|s| s.map(|v| scale_int(v, spec.bits_per_sample)))
                .collect::<Result<_, _>>(),
            SampleFormat::Float => reader
                .samples::<f32>()
                .map(|s| s.map(|v| (v.clamp(-1.0, 1.0) * i16::MAX as f32) as i16))
                .collect::<Result<_, _>>(),
        }
        .map_err(|e| RecognitionError::InvalidAudio(e.to_string()))?;

        let channels = spec.channels.max(1) as usize;
        let samples = interleaved
            .chunks(channels)
            .map(|frame| {
                let sum: i32 = frame.iter().map(|s| *s as i32).sum();
                (sum / frame.len() as i32) as i16
            })
            .collect();

        Ok(Self {
            sample_rate: spec.sample_rate,
            samples,
        })
    }

    /// Big-endian linear PCM, as expected by `audio/l16` endpoints.
    pub fn to_l16_be(&self) -> Vec<u8> {
        self.samples.iter().flat_map(|s| s.to_be_bytes()).collect()
    }
}

fn scale_int(value: i32, bits: u16) -> i16 {
    if bits <= 16 {
        (value << (16 - bits)) as i16
    } else {
        (value >> (bits - 16)) as i16
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    pub(crate) fn wav_bytes(channels: u16, samples: &[i16]) -> Vec<u8> {
        let spec = WavSpec {
            channels,
            sample_rate: 16_000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = WavWriter::new(&mut cursor, spec).unwrap();
            for sample in samples {
                writer.write_sample(*sample).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn decodes_mono_16_bit() {
        let audio = PcmAudio::from_wav(&wav_bytes(1, &[1, -2, 300])).unwrap();
        assert_eq!(audio.sample_rate, 16_000);
        assert_eq!(audio.samples, vec![1, -2, 300]);
    }

    #[test]
    fn averages_stereo_frames() {
        let audio = PcmAudio::from_wav(&wav_bytes(2, &[100, 300, -50, -150])).unwrap();
        assert_eq!(audio.samples, vec![200, -100]);
    }

    #[test]
    fn scales_other_bit_depths() {
        assert_eq!(scale_int(1, 8), 256);
        assert_eq!(scale_int(-128, 8), i16::MIN);
        assert_eq!(scale_int(65_536, 24), 256);
    }

    #[test]
    fn encodes_big_endian() {
        let audio = PcmAudio {
            sample_rate: 8_000,
            samples: vec![0x0102, -1],
        };
        assert_eq!(audio.to_l16_be(), vec![0x01, 0x02, 0xff, 0xff]);
    }

    #[test]
    fn rejects_non_wav() {
        assert!(matches!(
            PcmAudio::from_wav(b"RIFF....junk"),
            Err(RecognitionError::InvalidAudio(_))
        ));
    }
}

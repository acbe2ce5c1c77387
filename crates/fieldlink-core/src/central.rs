//! Central node receive/dispatch: poll, identify the channel, decode with
//! that channel's layout, hand the record to the sink.

use crate::channel::Channel;
use crate::error::PollError;
use crate::hal::{Receiver, MAX_PAYLOAD_LEN};
use crate::record::{FireVoltSample, Reading, SoilSample};

/// Where decoded readings go: a serial printer, a dashboard uplink, a queue.
pub trait ReadingSink {
    fn on_soil(&mut self, sample: SoilSample);
    fn on_fire_volt(&mut self, sample: FireVoltSample);
}

/// Per-outcome frame counters, so a malformed frame is never confused with
/// a valid all-zero reading.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    pub soil: u32,
    pub fire_volt: u32,
    pub malformed: u32,
    pub unknown_pipe: u32,
}

impl LinkStats {
    pub fn delivered(&self) -> u32 {
        self.soil.wrapping_add(self.fire_volt)
    }

    pub fn dropped(&self) -> u32 {
        self.malformed.wrapping_add(self.unknown_pipe)
    }
}

pub struct Aggregator<R, S> {
    radio: R,
    sink: S,
    stats: LinkStats,
    buf: [u8; MAX_PAYLOAD_LEN],
}

impl<R: Receiver, S: ReadingSink> Aggregator<R, S> {
    /// `radio` must already be listening on every channel in [`Channel::ALL`].
    pub fn new(radio: R, sink: S) -> Self {
        Self {
            radio,
            sink,
            stats: LinkStats::default(),
            buf: [0; MAX_PAYLOAD_LEN],
        }
    }

    /// One non-blocking poll. `Ok(None)` when nothing was waiting; in that
    /// case nothing is decoded or emitted.
    pub async fn poll(&mut self) -> Result<Option<Reading>, PollError<R::Error>> {
        let Some(frame) = self
            .radio
            .receive(&mut self.buf)
            .await
            .map_err(PollError::Radio)?
        else {
            return Ok(None);
        };

        let Some(channel) = Channel::from_pipe(frame.pipe) else {
            self.stats.unknown_pipe = self.stats.unknown_pipe.wrapping_add(1);
            return Err(PollError::UnknownPipe(frame.pipe));
        };

        let payload = &self.buf[..frame.len.min(MAX_PAYLOAD_LEN)];
        let reading = match channel.decode(payload) {
            Ok(r) => r,
            Err(error) => {
                self.stats.malformed = self.stats.malformed.wrapping_add(1);
                return Err(PollError::Decode { channel, error });
            }
        };

        match reading {
            Reading::Soil(s) => {
                self.stats.soil = self.stats.soil.wrapping_add(1);
                self.sink.on_soil(s);
            }
            Reading::FireVolt(s) => {
                self.stats.fire_volt = self.stats.fire_volt.wrapping_add(1);
                self.sink.on_fire_volt(s);
            }
        }
        Ok(Some(reading))
    }

    pub fn stats(&self) -> LinkStats {
        self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::vec::Vec;

    use embassy_futures::block_on;

    use super::*;
    use crate::error::DecodeError;
    use crate::hal::Frame;

    #[derive(Default)]
    struct QueuedRadio {
        frames: VecDeque<(u8, Vec<u8>)>,
    }

    impl QueuedRadio {
        fn push(&mut self, pipe: u8, payload: &[u8]) {
            self.frames.push_back((pipe, payload.to_vec()));
        }
    }

    impl Receiver for QueuedRadio {
        type Error = ();

        async fn receive(
            &mut self,
            buf: &mut [u8; MAX_PAYLOAD_LEN],
        ) -> Result<Option<Frame>, ()> {
            Ok(self.frames.pop_front().map(|(pipe, payload)| {
                buf[..payload.len()].copy_from_slice(&payload);
                Frame {
                    pipe,
                    len: payload.len(),
                }
            }))
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        readings: Vec<Reading>,
    }

    impl ReadingSink for RecordingSink {
        fn on_soil(&mut self, sample: SoilSample) {
            self.readings.push(Reading::Soil(sample));
        }

        fn on_fire_volt(&mut self, sample: FireVoltSample) {
            self.readings.push(Reading::FireVolt(sample));
        }
    }

    fn aggregator(radio: QueuedRadio) -> Aggregator<QueuedRadio, RecordingSink> {
        Aggregator::new(radio, RecordingSink::default())
    }

    #[test]
    fn empty_poll_emits_nothing() {
        let mut agg = aggregator(QueuedRadio::default());
        for _ in 0..3 {
            assert_eq!(block_on(agg.poll()), Ok(None));
        }
        assert!(agg.sink().readings.is_empty());
        assert_eq!(agg.stats(), LinkStats::default());
    }

    #[test]
    fn each_pipe_decodes_with_its_own_layout() {
        let soil = SoilSample {
            soil_top: 700,
            soil_deep: 0,
        };
        let fire = FireVoltSample {
            flame_detected: false,
            voltage: 12.25,
        };
        let mut radio = QueuedRadio::default();
        radio.push(1, &soil.to_bytes());
        radio.push(2, &fire.to_bytes());

        let mut agg = aggregator(radio);
        assert_eq!(block_on(agg.poll()), Ok(Some(Reading::Soil(soil))));
        assert_eq!(block_on(agg.poll()), Ok(Some(Reading::FireVolt(fire))));
        assert_eq!(block_on(agg.poll()), Ok(None));
        assert_eq!(
            agg.sink().readings,
            vec![Reading::Soil(soil), Reading::FireVolt(fire)]
        );
        assert_eq!(agg.stats().delivered(), 2);
    }

    #[test]
    fn swapped_payloads_are_rejected_not_reinterpreted() {
        let mut radio = QueuedRadio::default();
        radio.push(2, &SoilSample::default().to_bytes());
        radio.push(1, &FireVoltSample::default().to_bytes());

        let mut agg = aggregator(radio);
        assert_eq!(
            block_on(agg.poll()),
            Err(PollError::Decode {
                channel: Channel::FireVolt,
                error: DecodeError::Length {
                    expected: 5,
                    actual: 4
                }
            })
        );
        assert_eq!(
            block_on(agg.poll()),
            Err(PollError::Decode {
                channel: Channel::Soil,
                error: DecodeError::Length {
                    expected: 4,
                    actual: 5
                }
            })
        );
        assert!(agg.sink().readings.is_empty());
        assert_eq!(agg.stats().malformed, 2);
    }

    #[test]
    fn unknown_pipe_is_dropped_and_counted() {
        let mut radio = QueuedRadio::default();
        radio.push(0, &SoilSample::default().to_bytes());
        radio.push(5, &[]);

        let mut agg = aggregator(radio);
        assert_eq!(block_on(agg.poll()), Err(PollError::UnknownPipe(0)));
        assert_eq!(block_on(agg.poll()), Err(PollError::UnknownPipe(5)));
        assert!(agg.sink().readings.is_empty());
        assert_eq!(
            agg.stats(),
            LinkStats {
                unknown_pipe: 2,
                ..LinkStats::default()
            }
        );
        assert_eq!(agg.stats().dropped(), 2);
    }

    #[test]
    fn malformed_frame_does_not_block_the_next_one() {
        let good = SoilSample {
            soil_top: 3,
            soil_deep: 4,
        };
        let mut radio = QueuedRadio::default();
        radio.push(1, &[0xAA; 32]);
        radio.push(1, &good.to_bytes());

        let mut agg = aggregator(radio);
        assert!(block_on(agg.poll()).is_err());
        assert_eq!(block_on(agg.poll()), Ok(Some(Reading::Soil(good))));
        assert_eq!(agg.stats().soil, 1);
        assert_eq!(agg.stats().malformed, 1);
    }
}

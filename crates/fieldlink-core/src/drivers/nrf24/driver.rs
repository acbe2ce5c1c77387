//! nRF24L01+ transceiver driver
//! ===========================================================
//!
//! Enhanced ShockBurst with auto-ack and dynamic payload length on every
//! pipe, so the receiver always learns the real payload size.

use embedded_hal::digital::OutputPin;
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::spi::SpiDevice;

use super::protocol as p;
use crate::channel::{PipeAddress, ADDRESS_WIDTH};
use crate::hal::{Frame, Receiver, Transmitter, MAX_PAYLOAD_LEN};

/* ------------------------------------------------------------------------- */
/*  Error enum                                                               */
/* ------------------------------------------------------------------------- */
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<S, P> {
    Spi(S),
    Pin(P),
    /// SETUP_AW did not read back; chip missing or SPI miswired.
    NotResponding,
    InvalidPipe(u8),
    /// Pipes 2..=5 must share the upper four address bytes with pipe 1.
    AddressPrefixMismatch,
    PayloadTooLarge(usize),
    EmptyPayload,
    /// R_RX_PL_WID above 32; the RX FIFO has been flushed.
    CorruptPayloadWidth(u8),
    /// No ACK after the configured number of retransmits.
    MaxRetries,
    /// Neither TX_DS nor MAX_RT came up.
    Timeout,
}

/* ------------------------------------------------------------------------- */
/*  Configuration                                                            */
/* ------------------------------------------------------------------------- */
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerLevel {
    Min,  // -18 dBm
    Low,  // -12 dBm
    High, // -6 dBm
    Max,  // 0 dBm
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataRate {
    Kbps250,
    Mbps1,
    Mbps2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioConfig {
    /// RF channel, 2400 + n MHz. Clamped to 125.
    pub channel: u8,
    pub power: PowerLevel,
    pub data_rate: DataRate,
    /// Auto-retransmit delay, 250..=4000 µs in 250 µs steps.
    pub retransmit_delay_us: u16,
    /// Auto-retransmit count, 0..=15.
    pub retransmit_count: u8,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            channel: 76,
            power: PowerLevel::Low,
            data_rate: DataRate::Mbps1,
            retransmit_delay_us: 1500,
            retransmit_count: 15,
        }
    }
}

impl RadioConfig {
    fn rf_setup(&self) -> u8 {
        let rate = match self.data_rate {
            DataRate::Kbps250 => p::RF_SETUP_DR_LOW,
            DataRate::Mbps1 => 0,
            DataRate::Mbps2 => p::RF_SETUP_DR_HIGH,
        };
        let power = match self.power {
            PowerLevel::Min => 0b00,
            PowerLevel::Low => 0b01,
            PowerLevel::High => 0b10,
            PowerLevel::Max => 0b11,
        };
        rate | (power << p::RF_SETUP_PWR_SHIFT)
    }

    fn setup_retr(&self) -> u8 {
        let delay = (self.retransmit_delay_us / 250).clamp(1, 16) as u8 - 1;
        (delay << 4) | self.retransmit_count.min(15)
    }
}

/* ------------------------------------------------------------------------- */
/*  Constants                                                                */
/* ------------------------------------------------------------------------- */
const INIT_ATTEMPTS: u32 = 5;
const POWER_UP_MS: u32 = 5;
const CE_PULSE_US: u32 = 15;
const RX_SETTLE_US: u32 = 130;
const TX_POLL_US: u32 = 100;
// 60 ms, longer than 15 retransmits at 4 ms.
const TX_POLL_LIMIT: u32 = 600;

/* ------------------------------------------------------------------------- */
/*  Main driver struct                                                       */
/* ------------------------------------------------------------------------- */
pub struct Nrf24<SPI, CE, D> {
    spi: SPI,
    ce: CE,
    delay: D,
    config: u8,
    pipe1: Option<PipeAddress>,
}

type DriverError<SPI, CE> =
    Error<<SPI as embedded_hal_async::spi::ErrorType>::Error, <CE as embedded_hal::digital::ErrorType>::Error>;

impl<SPI, CE, D> Nrf24<SPI, CE, D>
where
    SPI: SpiDevice,
    CE: OutputPin,
    D: DelayNs,
{
    pub fn new(spi: SPI, ce: CE, delay: D) -> Self {
        Self {
            spi,
            ce,
            delay,
            config: p::CONFIG_EN_CRC | p::CONFIG_CRCO,
            pipe1: None,
        }
    }

    /* ================= low-level SPI helpers ========================== */

    /// Clock out `cmd` followed by `data`, replacing `data` with what came
    /// back. Returns STATUS, which the chip shifts out with every command.
    async fn command(&mut self, cmd: u8, data: &mut [u8]) -> Result<u8, DriverError<SPI, CE>> {
        let mut frame = [0u8; MAX_PAYLOAD_LEN + 1];
        let len = data.len().min(MAX_PAYLOAD_LEN);
        frame[0] = cmd;
        frame[1..=len].copy_from_slice(&data[..len]);
        self.spi
            .transfer_in_place(&mut frame[..=len])
            .await
            .map_err(Error::Spi)?;
        data[..len].copy_from_slice(&frame[1..=len]);
        Ok(frame[0])
    }

    async fn read_register(&mut self, reg: u8) -> Result<u8, DriverError<SPI, CE>> {
        let mut value = [0u8];
        self.command(p::R_REGISTER | (reg & p::REGISTER_MASK), &mut value)
            .await?;
        Ok(value[0])
    }

    async fn write_register(&mut self, reg: u8, value: u8) -> Result<(), DriverError<SPI, CE>> {
        self.command(p::W_REGISTER | (reg & p::REGISTER_MASK), &mut [value])
            .await?;
        Ok(())
    }

    /// Addresses go out least-significant byte first, i.e. last character first.
    async fn write_address(
        &mut self,
        reg: u8,
        addr: &PipeAddress,
    ) -> Result<(), DriverError<SPI, CE>> {
        let mut wire = *addr.as_bytes();
        wire.reverse();
        self.command(p::W_REGISTER | (reg & p::REGISTER_MASK), &mut wire)
            .await?;
        Ok(())
    }

    async fn update_register(
        &mut self,
        reg: u8,
        f: impl FnOnce(u8) -> u8,
    ) -> Result<(), DriverError<SPI, CE>> {
        let v = self.read_register(reg).await?;
        self.write_register(reg, f(v)).await
    }

    async fn status(&mut self) -> Result<u8, DriverError<SPI, CE>> {
        self.command(p::NOP, &mut []).await
    }

    async fn clear_irq(&mut self, flags: u8) -> Result<(), DriverError<SPI, CE>> {
        self.write_register(p::REG_STATUS, flags & p::STATUS_IRQ_MASK)
            .await
    }

    async fn flush_tx(&mut self) -> Result<(), DriverError<SPI, CE>> {
        self.command(p::FLUSH_TX, &mut []).await.map(|_| ())
    }

    async fn flush_rx(&mut self) -> Result<(), DriverError<SPI, CE>> {
        self.command(p::FLUSH_RX, &mut []).await.map(|_| ())
    }

    fn set_ce(&mut self, high: bool) -> Result<(), DriverError<SPI, CE>> {
        if high {
            self.ce.set_high().map_err(Error::Pin)
        } else {
            self.ce.set_low().map_err(Error::Pin)
        }
    }

    /* ================= bring-up ====================================== */

    async fn probe(&mut self) -> Result<bool, DriverError<SPI, CE>> {
        self.write_register(p::REG_SETUP_AW, p::AW_5_BYTES).await?;
        Ok(self.read_register(p::REG_SETUP_AW).await? == p::AW_5_BYTES)
    }

    /// Probe the chip and program `cfg`. Leaves the radio powered up in
    /// standby with no pipes open.
    pub async fn init(&mut self, cfg: &RadioConfig) -> Result<(), DriverError<SPI, CE>> {
        self.set_ce(false)?;
        self.delay.delay_ms(POWER_UP_MS).await;

        let mut attempt = 1;
        while !self.probe().await? {
            if attempt == INIT_ATTEMPTS {
                return Err(Error::NotResponding);
            }
            // 10, 20, 40, 80 ms
            self.delay.delay_ms(10 << (attempt - 1)).await;
            attempt += 1;
        }

        self.config = p::CONFIG_EN_CRC | p::CONFIG_CRCO;
        self.write_register(p::REG_CONFIG, self.config).await?;
        self.write_register(p::REG_SETUP_RETR, cfg.setup_retr())
            .await?;
        self.write_register(p::REG_RF_CH, cfg.channel.min(p::MAX_RF_CHANNEL))
            .await?;
        self.write_register(p::REG_RF_SETUP, cfg.rf_setup()).await?;
        self.write_register(p::REG_FEATURE, p::FEATURE_EN_DPL)
            .await?;
        self.write_register(p::REG_DYNPD, p::ALL_PIPES).await?;
        self.write_register(p::REG_EN_AA, p::ALL_PIPES).await?;
        self.write_register(p::REG_EN_RXADDR, 0).await?;
        self.pipe1 = None;

        self.clear_irq(p::STATUS_IRQ_MASK).await?;
        self.flush_rx().await?;
        self.flush_tx().await?;

        self.config |= p::CONFIG_PWR_UP;
        self.write_register(p::REG_CONFIG, self.config).await?;
        self.delay.delay_ms(POWER_UP_MS).await;
        Ok(())
    }

    /* ================= addressing ==================================== */

    /// Point the transmitter at `addr`. Pipe 0 gets the same address so the
    /// auto-ack can come back.
    pub async fn open_writing_pipe(&mut self, addr: &PipeAddress) -> Result<(), DriverError<SPI, CE>> {
        self.write_address(p::REG_TX_ADDR, addr).await?;
        self.write_address(p::rx_addr_reg(0), addr).await?;
        self.update_register(p::REG_EN_RXADDR, |v| v | 1).await
    }

    /// Open receive pipe 1..=5. Pipe 1 must be opened before pipes 2..=5,
    /// which only differ from it in the least-significant byte.
    pub async fn open_reading_pipe(
        &mut self,
        pipe: u8,
        addr: &PipeAddress,
    ) -> Result<(), DriverError<SPI, CE>> {
        match pipe {
            1 => {
                self.write_address(p::rx_addr_reg(1), addr).await?;
                self.pipe1 = Some(*addr);
            }
            2..=5 => {
                match self.pipe1 {
                    Some(base) if base.shares_prefix(addr) => {}
                    _ => return Err(Error::AddressPrefixMismatch),
                }
                self.write_register(p::rx_addr_reg(pipe), addr.lsb())
                    .await?;
            }
            _ => return Err(Error::InvalidPipe(pipe)),
        }
        self.update_register(p::REG_EN_RXADDR, |v| v | (1 << pipe))
            .await
    }

    /* ================= mode switching ================================ */

    pub async fn start_listening(&mut self) -> Result<(), DriverError<SPI, CE>> {
        self.config |= p::CONFIG_PWR_UP | p::CONFIG_PRIM_RX;
        self.write_register(p::REG_CONFIG, self.config).await?;
        self.clear_irq(p::STATUS_IRQ_MASK).await?;
        self.set_ce(true)?;
        self.delay.delay_us(RX_SETTLE_US).await;
        Ok(())
    }

    pub async fn stop_listening(&mut self) -> Result<(), DriverError<SPI, CE>> {
        self.set_ce(false)?;
        self.config &= !p::CONFIG_PRIM_RX;
        self.write_register(p::REG_CONFIG, self.config).await?;
        self.delay.delay_us(RX_SETTLE_US).await;
        Ok(())
    }

    /* ================= receive ======================================= */

    /// Pipe of the packet at the head of the RX FIFO, if any.
    pub async fn available(&mut self) -> Result<Option<u8>, DriverError<SPI, CE>> {
        let status = self.status().await?;
        let pipe = (status >> p::STATUS_RX_P_NO_SHIFT) & p::STATUS_RX_P_NO_MASK;
        // 0b110 is unused, 0b111 means the RX FIFO is empty.
        if pipe >= p::PIPE_COUNT {
            return Ok(None);
        }
        Ok(Some(pipe))
    }

    /// Pop the head of the RX FIFO into `buf`, returning its length.
    pub async fn read(&mut self, buf: &mut [u8; MAX_PAYLOAD_LEN]) -> Result<usize, DriverError<SPI, CE>> {
        let mut width = [0u8];
        self.command(p::R_RX_PL_WID, &mut width).await?;
        let width = width[0];
        if width as usize > MAX_PAYLOAD_LEN {
            self.flush_rx().await?;
            self.clear_irq(p::STATUS_RX_DR).await?;
            return Err(Error::CorruptPayloadWidth(width));
        }

        let len = width as usize;
        self.command(p::R_RX_PAYLOAD, &mut buf[..len]).await?;
        self.clear_irq(p::STATUS_RX_DR).await?;
        Ok(len)
    }

    /* ================= transmit ====================================== */

    /// Send one packet and wait for the ACK. The radio must not be listening.
    pub async fn send(&mut self, payload: &[u8]) -> Result<(), DriverError<SPI, CE>> {
        if payload.is_empty() {
            return Err(Error::EmptyPayload);
        }
        if payload.len() > MAX_PAYLOAD_LEN {
            return Err(Error::PayloadTooLarge(payload.len()));
        }

        self.clear_irq(p::STATUS_TX_DS | p::STATUS_MAX_RT).await?;
        let mut data = [0u8; MAX_PAYLOAD_LEN];
        data[..payload.len()].copy_from_slice(payload);
        self.command(p::W_TX_PAYLOAD, &mut data[..payload.len()])
            .await?;

        self.set_ce(true)?;
        self.delay.delay_us(CE_PULSE_US).await;
        self.set_ce(false)?;

        for _ in 0..TX_POLL_LIMIT {
            let status = self.status().await?;
            if status & p::STATUS_TX_DS != 0 {
                self.clear_irq(p::STATUS_TX_DS).await?;
                return Ok(());
            }
            if status & p::STATUS_MAX_RT != 0 {
                self.clear_irq(p::STATUS_MAX_RT).await?;
                self.flush_tx().await?;
                return Err(Error::MaxRetries);
            }
            self.delay.delay_us(TX_POLL_US).await;
        }

        self.flush_tx().await?;
        Err(Error::Timeout)
    }
}

impl<SPI, CE, D> Transmitter for Nrf24<SPI, CE, D>
where
    SPI: SpiDevice,
    CE: OutputPin,
    D: DelayNs,
{
    type Error = DriverError<SPI, CE>;

    async fn transmit(&mut self, payload: &[u8]) -> Result<(), Self::Error> {
        self.send(payload).await
    }
}

impl<SPI, CE, D> Receiver for Nrf24<SPI, CE, D>
where
    SPI: SpiDevice,
    CE: OutputPin,
    D: DelayNs,
{
    type Error = DriverError<SPI, CE>;

    async fn receive(
        &mut self,
        buf: &mut [u8; MAX_PAYLOAD_LEN],
    ) -> Result<Option<Frame>, Self::Error> {
        let Some(pipe) = self.available().await? else {
            return Ok(None);
        };
        let len = self.read(buf).await?;
        Ok(Some(Frame { pipe, len }))
    }
}

// SETUP_AW is always programmed for 5-byte addresses.
const _: () = assert!(ADDRESS_WIDTH == 5);

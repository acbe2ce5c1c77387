use embassy_stm32::adc::{Adc, AdcChannel, AnyAdcChannel};
use embassy_stm32::gpio::{Level, Output, Speed};
use embassy_stm32::mode::Async;
use embassy_stm32::peripherals::{self, ADC1};
use embassy_stm32::spi::{self, Spi};
use embassy_stm32::time::Hertz;
use embassy_stm32::usart::{Config as UsartConfig, UartTx};
use embassy_stm32::{rcc, Config};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use fieldlink_core::drivers::Nrf24;

use crate::config::{RADIO_SPI_FREQUENCY_HZ, TELEMETRY_BAUDRATE};
use crate::drivers::BoardAdc;

pub type RadioSpi = ExclusiveDevice<Spi<'static, Async>, Output<'static>, Delay>;
pub type Radio = Nrf24<RadioSpi, Output<'static>, Delay>;

// ── Board struct ──────────────────────────────────────────
// Every node runs on the same board; each binary takes what it needs.
pub struct Board {
    pub radio: Radio,
    pub adc: BoardAdc,
    pub a0: AnyAdcChannel<ADC1>,
    pub a1: AnyAdcChannel<ADC1>,
    pub d2: peripherals::PA10,
    pub d3: peripherals::PB3,
    pub telemetry: UartTx<'static, Async>, // ST-LINK VCP
}

impl Board {
    pub fn init() -> Self {
        let mut config = Config::default();

        // Enable HSI and configure PLL for 64MHz
        config.rcc.hsi = true; // 16MHz HSI, undivided (HSISYS DIV1)
        config.rcc.pll = Some(rcc::Pll {
            source: rcc::PllSource::HSI,    // Use HSI as PLL source
            prediv: rcc::PllPreDiv::DIV2,   // 16MHz / 2 = 8MHz
            mul: rcc::PllMul::MUL16,        // 8MHz * 16 = 128MHz
            divp: None,                     // Not used
            divq: None,                     // Not used
            divr: Some(rcc::PllRDiv::DIV2), // 128MHz / 2 = 64MHz
        });
        config.rcc.sys = rcc::Sysclk::PLL1_R;
        let p = embassy_stm32::init(config);

        // nRF24L01+ on SPI1  (DMA CH2 TX, CH3 RX)
        let mut spi_cfg = spi::Config::default();
        spi_cfg.mode = spi::MODE_0;
        spi_cfg.frequency = Hertz(RADIO_SPI_FREQUENCY_HZ);
        let spi1 = Spi::new(
            p.SPI1, p.PA5, p.PA7, p.PA6, // SCK, MOSI, MISO
            p.DMA1_CH2, p.DMA1_CH3, spi_cfg,
        );
        let csn = Output::new(p.PA4, Level::High, Speed::VeryHigh);
        let ce = Output::new(p.PB0, Level::Low, Speed::Low);
        let radio_spi = ExclusiveDevice::new(spi1, csn, Delay).unwrap();
        let radio = Nrf24::new(radio_spi, ce, Delay);

        // A0 / A1 on the Arduino header
        let adc = BoardAdc::new(Adc::new(p.ADC1));
        let a0 = p.PA0.degrade_adc();
        let a1 = p.PA1.degrade_adc();

        // USART2 TX only (DMA CH1)
        let mut us_cfg = UsartConfig::default();
        us_cfg.baudrate = TELEMETRY_BAUDRATE;
        let telemetry = UartTx::new(p.USART2, p.PA2, p.DMA1_CH1, us_cfg).unwrap();

        Self {
            radio,
            adc,
            a0,
            a1,
            d2: p.PA10,
            d3: p.PB3,
            telemetry,
        }
    }
}

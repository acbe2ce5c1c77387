// nRF24L01(+) SPI command set, register map and bit fields.

/* ───── SPI commands ──────────────────────────────────────────────── */
pub const R_REGISTER: u8 = 0x00; // | 5-bit register address
pub const W_REGISTER: u8 = 0x20; // | 5-bit register address
pub const REGISTER_MASK: u8 = 0x1F;
pub const R_RX_PAYLOAD: u8 = 0x61;
pub const W_TX_PAYLOAD: u8 = 0xA0;
pub const FLUSH_TX: u8 = 0xE1;
pub const FLUSH_RX: u8 = 0xE2;
pub const R_RX_PL_WID: u8 = 0x60;
pub const NOP: u8 = 0xFF;

/* ───── Registers ─────────────────────────────────────────────────── */
pub const REG_CONFIG: u8 = 0x00;
pub const REG_EN_AA: u8 = 0x01;
pub const REG_EN_RXADDR: u8 = 0x02;
pub const REG_SETUP_AW: u8 = 0x03;
pub const REG_SETUP_RETR: u8 = 0x04;
pub const REG_RF_CH: u8 = 0x05;
pub const REG_RF_SETUP: u8 = 0x06;
pub const REG_STATUS: u8 = 0x07;
pub const REG_OBSERVE_TX: u8 = 0x08;
pub const REG_RX_ADDR_P0: u8 = 0x0A;
pub const REG_RX_ADDR_P1: u8 = 0x0B;
pub const REG_TX_ADDR: u8 = 0x10;
pub const REG_RX_PW_P0: u8 = 0x11;
pub const REG_FIFO_STATUS: u8 = 0x17;
pub const REG_DYNPD: u8 = 0x1C;
pub const REG_FEATURE: u8 = 0x1D;

/// RX_ADDR_Pn for pipes 0..=5. Pipes 2..=5 hold only the LSB.
pub const fn rx_addr_reg(pipe: u8) -> u8 {
    REG_RX_ADDR_P0 + pipe
}

pub const fn rx_pw_reg(pipe: u8) -> u8 {
    REG_RX_PW_P0 + pipe
}

/* ───── CONFIG bits ───────────────────────────────────────────────── */
pub const CONFIG_MASK_RX_DR: u8 = 1 << 6;
pub const CONFIG_MASK_TX_DS: u8 = 1 << 5;
pub const CONFIG_MASK_MAX_RT: u8 = 1 << 4;
pub const CONFIG_EN_CRC: u8 = 1 << 3;
pub const CONFIG_CRCO: u8 = 1 << 2; // 2-byte CRC
pub const CONFIG_PWR_UP: u8 = 1 << 1;
pub const CONFIG_PRIM_RX: u8 = 1 << 0;

/* ───── STATUS bits ───────────────────────────────────────────────── */
pub const STATUS_RX_DR: u8 = 1 << 6;
pub const STATUS_TX_DS: u8 = 1 << 5;
pub const STATUS_MAX_RT: u8 = 1 << 4;
pub const STATUS_IRQ_MASK: u8 = STATUS_RX_DR | STATUS_TX_DS | STATUS_MAX_RT;
pub const STATUS_RX_P_NO_SHIFT: u8 = 1;
pub const STATUS_RX_P_NO_MASK: u8 = 0x07;
pub const STATUS_TX_FULL: u8 = 1 << 0;

/* ───── RF_SETUP bits ─────────────────────────────────────────────── */
pub const RF_SETUP_DR_LOW: u8 = 1 << 5;
pub const RF_SETUP_DR_HIGH: u8 = 1 << 3;
pub const RF_SETUP_PWR_SHIFT: u8 = 1;

/* ───── FIFO_STATUS bits ──────────────────────────────────────────── */
pub const FIFO_TX_EMPTY: u8 = 1 << 4;
pub const FIFO_RX_EMPTY: u8 = 1 << 0;

/* ───── FEATURE bits ──────────────────────────────────────────────── */
pub const FEATURE_EN_DPL: u8 = 1 << 2;

/* ───── Limits ────────────────────────────────────────────────────── */
pub const ALL_PIPES: u8 = 0x3F;
pub const PIPE_COUNT: u8 = 6;
/// SETUP_AW encoding of a 5-byte address.
pub const AW_5_BYTES: u8 = 0b11;
pub const MAX_RF_CHANNEL: u8 = 125;

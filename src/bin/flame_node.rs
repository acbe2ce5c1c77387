#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::gpio::{Input, Level, Output, Pull, Speed};
use {defmt_rtt as _, panic_probe as _};

use fieldlink::{config::FLAME_CONFIG, drivers::bring_up_transmitter, tasks::flame_task, Board};
use fieldlink_core::{Channel, FlameNode};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Starting fieldlink flame node");
    let mut board = Board::init();
    let flame = Input::new(board.d2, Pull::None);
    let actuator = Output::new(board.d3, Level::Low, Speed::Low);

    if let Err(e) = bring_up_transmitter(&mut board.radio, Channel::FireVolt).await {
        error!("Radio initialization failed: {:?}", e);
        core::future::pending::<()>().await;
    }

    match FlameNode::new(flame, actuator, board.adc, board.a0, board.radio, FLAME_CONFIG) {
        Ok(node) => {
            spawner.spawn(flame_task(node)).unwrap();
            info!("Flame task spawned, sending on {}", Channel::FireVolt.address());
        }
        Err(e) => error!("Flame node setup failed: {:?}", e),
    }

    core::future::pending::<()>().await;
}

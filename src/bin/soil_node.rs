#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use fieldlink::{drivers::bring_up_transmitter, tasks::soil_task, Board};
use fieldlink_core::{Channel, SoilNode};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Starting fieldlink soil node");
    let mut board = Board::init();

    match bring_up_transmitter(&mut board.radio, Channel::Soil).await {
        Ok(()) => {
            let node = SoilNode::new(board.adc, board.a0, board.a1, board.radio);
            spawner.spawn(soil_task(node)).unwrap();
            info!("Soil task spawned, sending on {}", Channel::Soil.address());
        }
        Err(e) => error!("Radio initialization failed: {:?}", e),
    }

    core::future::pending::<()>().await;
}

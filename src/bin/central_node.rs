#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use fieldlink::{
    drivers::bring_up_receiver,
    ipc::ChannelSink,
    tasks::{receive_task, telemetry_task},
    Board,
};
use fieldlink_core::Aggregator;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Starting fieldlink central node");
    let mut board = Board::init();

    // Telemetry runs even without a radio so the console shows the node is alive.
    spawner.spawn(telemetry_task(board.telemetry)).unwrap();

    match bring_up_receiver(&mut board.radio).await {
        Ok(()) => {
            let central = Aggregator::new(board.radio, ChannelSink);
            spawner.spawn(receive_task(central)).unwrap();
            info!("Receive task spawned");
        }
        Err(e) => error!("Radio initialization failed: {:?}", e),
    }

    core::future::pending::<()>().await;
}

use maxrects::{Heuristic, MaxRectsPacker, RectSize};

fn main() -> Result<(), maxrects::PackError> {
    env_logger::init();

    let inputs: Vec<_> = (0..5).map(|i| RectSize::new(128.0, 128.0, i)).collect();

    let mut packer = MaxRectsPacker::new(256.0, 256.0, false)?;
    let result = packer.insert_batch(inputs, Heuristic::BestShortSideFit)?;

    println!("Pack result: {:#?}", result);
    println!("Occupancy: {}", packer.occupancy());

    Ok(())
}

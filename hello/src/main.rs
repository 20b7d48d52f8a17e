use mpi::traits::*;

fn main() {
    let universe = mpi::initialize().unwrap();
    let world = universe.world();

    let host = mpi::environment::processor_name().unwrap();

    println!(
        "Hello from rank {} of {} on host {}",
        world.rank(),
        world.size(),
        host
    );
}

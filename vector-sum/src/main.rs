use clap::Parser;
use mpi::collective::SystemOperation;
use mpi::traits::*;

const ROOT_RANK: i32 = 0;

#[derive(Parser, Debug)]
#[command(version, about, long_about=None)]
struct Args {
    /// Total number of vector elements across all processes.
    #[arg(short = 'n', default_value_t = 1_000_000)]
    length: usize,
}

fn main() {
    let args = Args::parse();

    let universe = mpi::initialize().unwrap();
    let world = universe.world();

    let root_proc = world.process_at_rank(ROOT_RANK);
    let n_proc = world.size() as usize;
    let rank = world.rank();

    // every process checks the precondition independently, so the whole
    // group terminates with the same status
    let Some(chunk_size) = chunk_len(args.length, n_proc) else {
        if rank == ROOT_RANK {
            eprintln!(
                "Error: N must be divisible by the number of processes. N={} size={}",
                args.length, n_proc
            );
        }
        std::process::exit(1);
    };

    let local_data = vec![1i32; chunk_size];

    world.barrier(); // timing
    let start_time = mpi::time();

    let local_sum = sum_chunk(&local_data);

    // reduce all local sums onto root
    let mut global_sum = 0i32;
    if rank == ROOT_RANK {
        root_proc.reduce_into_root(&local_sum, &mut global_sum, SystemOperation::sum());
    } else {
        root_proc.reduce_into(&local_sum, SystemOperation::sum());
    }

    world.barrier(); // timing
    let elapsed = mpi::time() - start_time;

    if rank == ROOT_RANK {
        println!("Global sum = {}", global_sum);
        println!("Elapsed time = {} seconds", elapsed);
    }
}

/// Number of elements each process owns, if the vector splits evenly.
fn chunk_len(n: usize, n_proc: usize) -> Option<usize> {
    if n_proc == 0 || n % n_proc != 0 {
        return None;
    }

    Some(n / n_proc)
}

fn sum_chunk(data: &[i32]) -> i32 {
    data.iter().sum()
}

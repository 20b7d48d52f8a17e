use clap::Parser;
use mpi::traits::*;

mod matrix;

type NumberType = f64;

const ROOT_RANK: i32 = 0;

#[derive(Parser, Debug)]
#[command(version, about, long_about=None)]
struct Args {
    /// Dimension of the square matrices A, B and C.
    #[arg(short = 'n', default_value_t = 256)]
    dimension: usize,
}

fn main() {
    // parsed by every process on its own; mpiexec hands the same argv to all of them
    let args = Args::parse();

    let universe = mpi::initialize().unwrap();
    let world = universe.world();

    let root_proc = world.process_at_rank(ROOT_RANK);
    let n_proc = world.size() as usize;
    let rank = world.rank();

    let n = args.dimension;

    // every process checks the precondition independently, so the whole
    // group terminates with the same status before anything is allocated
    let Some(rows_per_proc) = matrix::band_rows(n, n_proc) else {
        if rank == ROOT_RANK {
            eprintln!(
                "Error: N must be divisible by the number of processes. N={} size={}",
                n, n_proc
            );
        }
        std::process::exit(1);
    };

    // a single process does the whole thing locally, no distribution needed
    if n_proc == 1 {
        let a = matrix::generate(n, |i, j| (i + j) as NumberType);
        let b = matrix::generate(n, |i, j| i as NumberType - j as NumberType);

        let start_time = mpi::time();
        let c = matrix::multiply(&a, &b, n);
        let elapsed = mpi::time() - start_time;

        report(n, n_proc, &c, elapsed);
        return;
    }

    let band_elems = rows_per_proc * n;

    let mut local_a = vec![0f64; band_elems];
    let mut local_c = vec![0f64; band_elems];

    // only root materializes the full input and output matrices
    let (a, mut c) = if rank == ROOT_RANK {
        (
            matrix::generate(n, |i, j| (i + j) as NumberType),
            vec![0f64; n * n],
        )
    } else {
        (vec![], vec![])
    };

    let mut b = if rank == ROOT_RANK {
        matrix::generate(n, |i, j| i as NumberType - j as NumberType)
    } else {
        vec![0f64; n * n]
    };

    // every process gets its own full copy of B
    root_proc.broadcast_into(&mut b[..]);

    // each process receives one contiguous band of A's rows
    if rank == ROOT_RANK {
        root_proc.scatter_into_root(&a[..], &mut local_a[..]);
    } else {
        root_proc.scatter_into(&mut local_a[..]);
    }

    world.barrier(); // timing
    let start_time = mpi::time();

    matrix::multiply_band(&local_a, &b, n, &mut local_c);

    // bands arrive in rank order, which reassembles C's rows contiguously
    if rank == ROOT_RANK {
        root_proc.gather_into_root(&local_c[..], &mut c[..]);
    } else {
        root_proc.gather_into(&local_c[..]);
    }

    world.barrier(); // timing
    let elapsed = mpi::time() - start_time;

    if rank == ROOT_RANK {
        report(n, n_proc, &c, elapsed);
    }
}

fn report(n: usize, n_proc: usize, c: &[NumberType], elapsed: f64) {
    println!("Matrix multiply done (N={}, ranks={}).", n, n_proc);
    println!("Checksum(C) = {}", matrix::checksum(c));
    println!("Elapsed time = {} seconds", elapsed);
}

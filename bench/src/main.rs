use std::time::Instant;

use clearway_core::{shortest_time, Clearance, Graph};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mode = args.get(1).map(|s| s.as_str()).unwrap_or("all");
    let node_count: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(1_000_000);

    if mode == "help" || mode == "--help" {
        println!("Usage: clearway-bench [mode] [node_count]");
        println!();
        println!("Modes:");
        println!("  all       Run all generators and benchmark each (default)");
        println!("  corridor  Gated chain — every gate needs an upgrade taken earlier");
        println!("  ring      Ring lattice with random shortcuts and scattered gates");
        println!("  random    Erdos-Renyi uniform random segments, random gates");
        println!("  bridge    Two open clusters joined only by a fully gated bridge");
        println!();
        println!("Default node_count: 1000000");
        return;
    }

    println!("clearway-bench");
    println!("==============");
    println!();

    type Generator = fn(usize) -> (Vec<Clearance>, Vec<(usize, usize, f64, Clearance)>);
    let generators: Vec<(&str, Generator)> = match mode {
        "corridor" => vec![("Gated corridor", gen_corridor as Generator)],
        "ring" => vec![("Ring + shortcuts", gen_ring as Generator)],
        "random" => vec![("Erdos-Renyi random", gen_random as Generator)],
        "bridge" => vec![("Gated bridge", gen_bridge as Generator)],
        "all" => vec![
            ("Gated corridor", gen_corridor as Generator),
            ("Ring + shortcuts", gen_ring),
            ("Erdos-Renyi random", gen_random),
            ("Gated bridge", gen_bridge),
        ],
        _ => {
            eprintln!("Unknown mode: {}. Use --help for options.", mode);
            return;
        }
    };

    for (name, generator) in generators {
        run_benchmark(name, generator, node_count);
    }
}

fn run_benchmark(
    name: &str,
    generator: fn(usize) -> (Vec<Clearance>, Vec<(usize, usize, f64, Clearance)>),
    node_count: usize,
) {
    println!("--- {} ---", name);
    println!("Target: {} stations", node_count);

    let t = Instant::now();
    let (grants, segments) = generator(node_count);
    let gen_time = t.elapsed();

    let t = Instant::now();
    let graph = match Graph::build(grants, segments) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("generator produced an invalid graph: {}", e);
            return;
        }
    };
    let build_time = t.elapsed();
    println!(
        "Generated in {:.2}s, built in {:.2}s — {} stations, {} segments",
        gen_time.as_secs_f64(),
        build_time.as_secs_f64(),
        graph.node_count(),
        graph.edge_count()
    );

    println!();
    println!("{:>12} {:>12} {:>14} {:>10}", "source", "target", "time", "query");
    println!("{:->12} {:->12} {:->14} {:->10}", "", "", "", "");

    let last = graph.node_count() - 1;
    for (source, target) in [(0, last), (0, last / 2), (last / 2, last), (last, 0)] {
        let t = Instant::now();
        let result = shortest_time(&graph, source, target);
        let elapsed = t.elapsed();
        let shown = match result {
            Ok(Some(time)) => format!("{:.0}", time),
            Ok(None) => "no route".to_string(),
            Err(e) => format!("error: {}", e),
        };
        println!(
            "{:>12} {:>12} {:>14} {:>8.1}ms",
            source,
            target,
            shown,
            elapsed.as_secs_f64() * 1000.0
        );
    }
    println!();
}

// ---------------------------------------------------------------------------
// Generators — all O(n + segments), single-threaded, deterministic
// ---------------------------------------------------------------------------

/// Simple LCG for deterministic, fast pseudo-random numbers.
struct FastRng(u64);

impl FastRng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next(&mut self, max: u64) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 33) % max
    }
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

const LEVELS: [Clearance; 3] = [Clearance::Red, Clearance::Blue, Clearance::Green];

fn random_level(rng: &mut FastRng) -> Clearance {
    LEVELS[rng.next(LEVELS.len() as u64) as usize]
}

/// Gated chain: every 100th station grants a level, and the segments that
/// follow it require exactly that level until the next grant. The long route
/// exists but forces an upgrade at each granting station. Deep, narrow
/// stress case for the augmented state space.
fn gen_corridor(node_count: usize) -> (Vec<Clearance>, Vec<(usize, usize, f64, Clearance)>) {
    let mut rng = FastRng::new(42);
    let mut grants = vec![Clearance::None; node_count.max(2)];
    let mut segments = Vec::with_capacity(node_count);

    let mut current_gate = Clearance::None;
    for i in 0..grants.len() - 1 {
        if i % 100 == 0 {
            let level = random_level(&mut rng);
            grants[i] = level;
            current_gate = level;
        }
        let duration = (1 + rng.next(10)) as f64;
        segments.push((i, i + 1, duration, current_gate));
    }

    (grants, segments)
}

/// Ring lattice with K forward neighbors per station plus random long-range
/// shortcuts. A tenth of the stations grant a level; a tenth of the segments
/// are gated. Short paths with occasional gate detours.
fn gen_ring(node_count: usize) -> (Vec<Clearance>, Vec<(usize, usize, f64, Clearance)>) {
    let k = 4usize;
    let mut rng = FastRng::new(67890);
    let n = node_count.max(2);

    let mut grants = vec![Clearance::None; n];
    for g in grants.iter_mut() {
        if rng.next(10) == 0 {
            *g = random_level(&mut rng);
        }
    }

    let mut segments = Vec::with_capacity(n * (k + 1));
    for i in 0..n {
        for j in 1..=k {
            let neighbor = (i + j) % n;
            let required = if rng.next(10) == 0 { random_level(&mut rng) } else { Clearance::None };
            segments.push((i, neighbor, (1 + rng.next(10)) as f64, required));
        }
        // Shortcut with probability 0.05
        if rng.next_f64() < 0.05 {
            let far = rng.next(n as u64) as usize;
            if far != i {
                segments.push((i, far, (1 + rng.next(10)) as f64, Clearance::None));
            }
        }
    }

    (grants, segments)
}

/// Erdos-Renyi: ~8 random segments per station, a quarter of them gated,
/// grants scattered over a tenth of the stations. Baseline topology with no
/// structure; routes may or may not exist.
fn gen_random(node_count: usize) -> (Vec<Clearance>, Vec<(usize, usize, f64, Clearance)>) {
    let mut rng = FastRng::new(54321);
    let n = node_count.max(2);
    let target_segments = n * 8;

    let mut grants = vec![Clearance::None; n];
    for g in grants.iter_mut() {
        if rng.next(10) == 0 {
            *g = random_level(&mut rng);
        }
    }

    let mut segments = Vec::with_capacity(target_segments);
    for _ in 0..target_segments {
        let from = rng.next(n as u64) as usize;
        let to = rng.next(n as u64) as usize;
        if from == to {
            continue;
        }
        let required = if rng.next(4) == 0 { random_level(&mut rng) } else { Clearance::None };
        segments.push((from, to, (1 + rng.next(10)) as f64, required));
    }

    (grants, segments)
}

/// Two open clusters joined only by a thin bridge whose every segment is
/// Red-gated; the single Red grant sits at the bridge entrance. Worst case
/// for "find the one mandatory upgrade".
fn gen_bridge(node_count: usize) -> (Vec<Clearance>, Vec<(usize, usize, f64, Clearance)>) {
    let mut rng = FastRng::new(99999);
    let n = node_count.max(24);
    let bridge_len = 10usize;
    let cluster = (n - bridge_len) / 2;

    let mut grants = vec![Clearance::None; n];
    let mut segments = Vec::with_capacity(n * 8);

    // Cluster A: stations 0..cluster, random ungated segments
    for i in 0..cluster {
        for _ in 0..8 {
            let to = rng.next(cluster as u64) as usize;
            if to != i {
                segments.push((i, to, (1 + rng.next(10)) as f64, Clearance::None));
            }
        }
    }

    // Bridge: chain cluster-1 → bridge → cluster B, all Red-gated; the
    // grant is at the last station of cluster A.
    grants[cluster - 1] = Clearance::Red;
    let bridge_start = cluster;
    segments.push((cluster - 1, bridge_start, 1.0, Clearance::Red));
    for i in 1..bridge_len {
        segments.push((bridge_start + i - 1, bridge_start + i, 1.0, Clearance::Red));
    }
    let b_start = bridge_start + bridge_len;
    segments.push((b_start - 1, b_start, 1.0, Clearance::Red));

    // Cluster B: stations b_start..n, random ungated segments
    for i in b_start..n {
        for _ in 0..8 {
            let to = b_start + rng.next((n - b_start) as u64) as usize;
            if to != i {
                segments.push((i, to, (1 + rng.next(10)) as f64, Clearance::None));
            }
        }
    }

    (grants, segments)
}

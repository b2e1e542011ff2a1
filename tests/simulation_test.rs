mod common;

use common::*;
use gridnoc::Simulation;

#[test]
fn fixed_seed_is_reproducible()
{
	init_logging();
	let build=||create_synthetic_config(SyntheticConfigBuilder{
		num_gpus: 16,
		topology: "mesh",
		num_virtual_channels: 1,
		routing_algo: "deterministic",
		traffic_pattern: "uniform_random",
		injection_rate: 0.02,
		simulation_cycles: 1000,
		random_seed: 1,
	});
	let mut first=Simulation::new(&build());
	first.run(first.simulation_cycles);
	let mut second=Simulation::new(&build());
	second.run(second.simulation_cycles);
	assert!(first.tracker.received_packets()>0,"some traffic must complete at this rate");
	assert_eq!(first.tracker.latencies(),second.tracker.latencies(),"equal seeds must give bit-identical latency lists");
	assert_eq!(first.tracker.hop_counts(),second.tracker.hop_counts());
}

#[test]
fn received_packets_match_the_latency_list()
{
	init_logging();
	let cv=create_synthetic_config(SyntheticConfigBuilder{
		num_gpus: 16,
		topology: "mesh",
		num_virtual_channels: 2,
		routing_algo: "deterministic",
		traffic_pattern: "uniform_random",
		injection_rate: 0.05,
		simulation_cycles: 1000,
		random_seed: 3,
	});
	let mut simulation=Simulation::new(&cv);
	simulation.run(simulation.simulation_cycles);
	let received:usize=simulation.nodes.iter().map(|node|node.packets_received).sum();
	assert_eq!(received,simulation.tracker.received_packets());
	assert_eq!(received,simulation.tracker.latencies().len());
	let sent:usize=simulation.nodes.iter().map(|node|node.packets_sent).sum();
	assert!(received<=sent);
	//Every latency is at least the cheapest possible traversal: injection, one hop, ejection.
	assert!(simulation.tracker.latencies().iter().all(|latency|*latency>=3));
}

#[test]
fn single_deterministic_packet_meets_the_latency_bound()
{
	init_logging();
	let cv=create_synthetic_config(SyntheticConfigBuilder{
		num_gpus: 16,
		topology: "mesh",
		num_virtual_channels: 1,
		routing_algo: "deterministic",
		traffic_pattern: "uniform_random",
		injection_rate: 0.0,
		simulation_cycles: 100,
		random_seed: 1,
	});
	let mut simulation=Simulation::new(&cv);
	{
		let mut rng=simulation.rng.borrow_mut();
		//Corner to corner of the 4x4 mesh: 6 hops, 4 flits.
		simulation.nodes[0].inject_workload_packet(15,4,0,0,&mut simulation.packet_ids,&mut simulation.tracker,&mut rng);
	}
	simulation.run(100);
	assert_eq!(simulation.tracker.received_packets(),1);
	assert_eq!(simulation.tracker.hop_counts(),&[6]);
	//Manhattan distance plus the tail serialization is a lower bound on the latency.
	assert!(simulation.tracker.latencies()[0]>=6+4-1);
	assert_eq!(simulation.nodes[15].packets_received,1);
}

#[test]
fn zero_injection_rate_generates_nothing()
{
	init_logging();
	let cv=create_synthetic_config(SyntheticConfigBuilder{
		num_gpus: 16,
		topology: "mesh",
		num_virtual_channels: 1,
		routing_algo: "deterministic",
		traffic_pattern: "uniform_random",
		injection_rate: 0.0,
		simulation_cycles: 500,
		random_seed: 1,
	});
	let mut simulation=Simulation::new(&cv);
	simulation.run(simulation.simulation_cycles);
	let sent:usize=simulation.nodes.iter().map(|node|node.packets_sent).sum();
	assert_eq!(sent,0);
	assert!(simulation.tracker.latencies().is_empty());
	let results=simulation.get_simulation_results();
	assert_eq!(result_number(&results,"average_packet_latency"),0.0);
	assert_eq!(result_number(&results,"throughput"),0.0);
}

#[test]
fn a_single_node_generates_nothing()
{
	init_logging();
	let cv=create_synthetic_config(SyntheticConfigBuilder{
		num_gpus: 1,
		topology: "mesh",
		num_virtual_channels: 1,
		routing_algo: "deterministic",
		traffic_pattern: "uniform_random",
		injection_rate: 0.9,
		simulation_cycles: 200,
		random_seed: 1,
	});
	let mut simulation=Simulation::new(&cv);
	simulation.run(simulation.simulation_cycles);
	let sent:usize=simulation.nodes.iter().map(|node|node.packets_sent).sum();
	assert_eq!(sent,0,"a single node has no legal destination");
}

#[test]
fn hotspot_node_receives_the_most_traffic()
{
	init_logging();
	let cv=create_synthetic_config(SyntheticConfigBuilder{
		num_gpus: 16,
		topology: "mesh",
		num_virtual_channels: 1,
		routing_algo: "deterministic",
		traffic_pattern: "hotspot",
		injection_rate: 0.10,
		simulation_cycles: 1000,
		random_seed: 1,
	});
	let cv=with_entry(cv,"hotspot_nodes",gridnoc::config::ConfigurationValue::Array(vec![gridnoc::config::ConfigurationValue::Number(0.0)]));
	let cv=with_entry(cv,"hotspot_rate",gridnoc::config::ConfigurationValue::Number(0.5));
	let mut simulation=Simulation::new(&cv);
	simulation.run(simulation.simulation_cycles);
	let hotspot_received=simulation.nodes[0].packets_received;
	for node in simulation.nodes.iter().skip(1)
	{
		assert!(hotspot_received>node.packets_received,
			"the hotspot received {} but node {} received {}",hotspot_received,node.index(),node.packets_received);
	}
}

#[test]
fn torus_is_not_slower_than_mesh()
{
	init_logging();
	let build=|topology|create_synthetic_config(SyntheticConfigBuilder{
		num_gpus: 16,
		topology,
		num_virtual_channels: 1,
		routing_algo: "deterministic",
		traffic_pattern: "uniform_random",
		injection_rate: 0.02,
		simulation_cycles: 1000,
		random_seed: 1,
	});
	let mut mesh=Simulation::new(&build("mesh"));
	mesh.run(mesh.simulation_cycles);
	let mut torus=Simulation::new(&build("torus"));
	torus.run(torus.simulation_cycles);
	assert!(mesh.tracker.received_packets()>0);
	assert!(torus.tracker.received_packets()>0);
	//The wrap-around links halve the worst-case diameter.
	assert!(torus.tracker.calculate_average_latency()<=mesh.tracker.calculate_average_latency());
}

#[test]
fn adaptive_routing_relieves_the_transpose_pattern()
{
	init_logging();
	let build=|routing_algo|create_synthetic_config(SyntheticConfigBuilder{
		num_gpus: 16,
		topology: "mesh",
		num_virtual_channels: 4,
		routing_algo,
		traffic_pattern: "transpose",
		injection_rate: 0.15,
		simulation_cycles: 3000,
		random_seed: 1,
	});
	let mut deterministic=Simulation::new(&build("deterministic"));
	deterministic.run(deterministic.simulation_cycles);
	let mut adaptive=Simulation::new(&build("adaptive"));
	adaptive.run(adaptive.simulation_cycles);
	assert!(adaptive.tracker.received_packets()>0);
	//The generators are seeded alike, so both runs offer the same traffic; only the routing differs.
	assert!(adaptive.tracker.calculate_average_latency()<deterministic.tracker.calculate_average_latency(),
		"adaptive {} vs deterministic {}",adaptive.tracker.calculate_average_latency(),deterministic.tracker.calculate_average_latency());
}

#[test]
fn transpose_falls_back_to_uniform_off_grid()
{
	init_logging();
	//A fat-tree has no coordinates to swap; the pattern must warn once and keep simulating.
	let cv=create_synthetic_config(SyntheticConfigBuilder{
		num_gpus: 16,
		topology: "fat_tree",
		num_virtual_channels: 2,
		routing_algo: "deterministic",
		traffic_pattern: "transpose",
		injection_rate: 0.05,
		simulation_cycles: 1000,
		random_seed: 1,
	});
	let mut simulation=Simulation::new(&cv);
	simulation.run(simulation.simulation_cycles);
	assert!(simulation.tracker.received_packets()>0);
}

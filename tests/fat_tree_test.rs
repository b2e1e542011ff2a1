mod common;

use common::*;
use gridnoc::config::ConfigurationValue;
use gridnoc::Simulation;

fn fat_tree_config(routing_algo:&'static str, injection_rate:f64) -> ConfigurationValue
{
	create_synthetic_config(SyntheticConfigBuilder{
		num_gpus: 16,
		topology: "fat_tree",
		num_virtual_channels: 2,
		routing_algo,
		traffic_pattern: "uniform_random",
		injection_rate,
		simulation_cycles: 1000,
		random_seed: 1,
	})
}

///Inject one single-flit packet per ordered pair of nodes and drain the network.
fn all_pairs_complete(routing_algo:&'static str)
{
	let cv=fat_tree_config(routing_algo,0.0);
	let mut simulation=Simulation::new(&cv);
	let num_nodes=simulation.nodes.len();
	{
		let mut rng=simulation.rng.borrow_mut();
		for source in 0..num_nodes
		{
			for destination in 0..num_nodes
			{
				if source!=destination
				{
					simulation.nodes[source].inject_workload_packet(destination,1,0,0,&mut simulation.packet_ids,&mut simulation.tracker,&mut rng);
				}
			}
		}
	}
	simulation.run(500);
	let expected=num_nodes*(num_nodes-1);
	assert_eq!(simulation.tracker.received_packets(),expected,"every packet must complete");
	//Worst case is edge, aggregation, core, aggregation, edge: 4 router-to-router hops.
	assert!(simulation.tracker.maximum_packet_hops()<=4);
	assert_eq!(simulation.network.buffered_flits(),0,"the fabric must drain");
}

#[test]
fn all_pairs_complete_deterministically()
{
	init_logging();
	all_pairs_complete("deterministic");
}

#[test]
fn all_pairs_complete_adaptively()
{
	init_logging();
	all_pairs_complete("adaptive");
}

#[test]
fn random_traffic_stays_within_the_hop_bound()
{
	init_logging();
	let cv=fat_tree_config("adaptive",0.05);
	let mut simulation=Simulation::new(&cv);
	simulation.run(simulation.simulation_cycles);
	assert!(simulation.tracker.received_packets()>0);
	assert!(simulation.tracker.maximum_packet_hops()<=4);
	//Packets between different pods really climb to the cores.
	assert!(simulation.tracker.hop_counts().iter().any(|hops|*hops==4));
}

#[test]
fn hybrid_architecture_routes_the_configured_patterns_to_the_secondary_fabric()
{
	init_logging();
	let cv=fat_tree_config("deterministic",0.0);
	//Rebuild over a mesh primary with a fat-tree secondary taking the uniform traffic.
	let cv=match cv
	{
		ConfigurationValue::Object(name,pairs) =>
		{
			let pairs=pairs.into_iter().map(|(key,value)|{
				if key=="topology"
				{
					(key,ConfigurationValue::Literal("mesh".to_string()))
				}
				else if key=="injection_rate"
				{
					(key,ConfigurationValue::Number(0.05))
				}
				else
				{
					(key,value)
				}
			}).collect();
			ConfigurationValue::Object(name,pairs)
		},
		_ => unreachable!(),
	};
	let cv=with_entry(cv,"architecture",ConfigurationValue::Literal("hybrid_electrical".to_string()));
	let cv=with_entry(cv,"hybrid_electrical_config",ConfigurationValue::Object("HybridElectricalConfig".to_string(),vec![
		("secondary_topology".to_string(),ConfigurationValue::Literal("fat_tree".to_string())),
		("secondary_traffic".to_string(),ConfigurationValue::Array(vec![ConfigurationValue::Literal("uniform_random".to_string())])),
	]));
	let mut simulation=Simulation::new(&cv);
	simulation.run(simulation.simulation_cycles);
	assert!(simulation.tracker.received_packets()>0);
	//Every packet rode the fat-tree: the mesh never buffered a flit and no path exceeded the tree bound.
	assert_eq!(simulation.network.buffered_flits(),0);
	assert!(simulation.tracker.maximum_packet_hops()<=4);
	let secondary=simulation.secondary_network.as_ref().expect("the hybrid architecture builds a secondary fabric");
	assert_eq!(secondary.topology.num_nodes(),16);
}

/*!
gridnoc
=====

This crate provides a cycle-accurate simulator of the networks-on-chip of GPU-grid accelerators, as a library. It advances a global discrete clock; on every tick each router performs route computation, virtual-channel arbitration and flit forwarding, while each attached compute node injects traffic and reassembles arriving packets. The measured outputs are per-packet end-to-end latency in cycles and network throughput.

The dashboards, plotters and sweep drivers that consume these measures are external to the crate: they build a configuration tree, hand it to [Simulation::new] and read the results back.

# Usage

```ignore
use gridnoc::Simulation;
use gridnoc::config::ConfigurationValue;

let configuration = ConfigurationValue::Object("Configuration".to_string(),vec![
	("num_gpus".to_string(),ConfigurationValue::Number(16.0)),
	("topology".to_string(),ConfigurationValue::Literal("mesh".to_string())),
	("num_virtual_channels".to_string(),ConfigurationValue::Number(2.0)),
	("routing_algo".to_string(),ConfigurationValue::Literal("deterministic".to_string())),
	("traffic_pattern".to_string(),ConfigurationValue::Literal("uniform_random".to_string())),
	("injection_rate".to_string(),ConfigurationValue::Number(0.02)),
	("simulation_cycles".to_string(),ConfigurationValue::Number(1000.0)),
	("random_seed".to_string(),ConfigurationValue::Number(1.0)),
]);
let mut simulation = Simulation::new(&configuration);
simulation.run(simulation.simulation_cycles);
let average_latency = simulation.tracker.calculate_average_latency();
```

# Configuration

The recognized entries of the `Configuration` object are:
* `num_gpus`: node count; must satisfy the topology constraint.
* `topology`: `"mesh"`, `"torus"` or `"fat_tree"`.
* `fat_tree_k`: even arity of the fat-tree; defaults to 4.
* `num_virtual_channels`: virtual channels per port.
* `router_buffer_size`: depth of each virtual-channel FIFO; defaults to 8.
* `routing_algo`: `"deterministic"` or `"adaptive"`; defaults to deterministic.
* `strict_backpressure`: whether arbitration skips winners whose downstream buffer is full; defaults to false.
* `traffic_pattern`: `"uniform_random"`, `"transpose"`, `"hotspot"` or `"all_reduce"`.
* `injection_rate`: probability in [0,1] that a node creates a packet each cycle.
* `hotspot_nodes`, `hotspot_rate`: targets and bias of the hotspot pattern.
* `simulation_cycles`: run length for synthetic traffic.
* `workload`: a `Workload` object with `all_reduce_data_size` and `all_reduce_chunk_size_flits`.
* `simulation_timeout_cycles`: safety bound for workload-driven runs.
* `random_seed`: seed of the pseudo-random generator. When absent a seed is drawn and logged.
* `architecture`: `"monolithic"` (default) or `"hybrid_electrical"`.
* `hybrid_electrical_config`: a `HybridElectricalConfig` object with `secondary_topology` and `secondary_traffic`.

*/

pub mod config;
pub mod error;
pub mod matrix;
pub mod measures;
pub mod topology;
pub mod routing;
pub mod router;
pub mod pattern;
pub mod workload;

use std::cell::RefCell;
use std::collections::{BTreeMap,VecDeque};
use std::rc::Rc;

use ::rand::{Rng,rngs::StdRng,SeedableRng};
use log::{debug,info,warn};

use crate::config::ConfigurationValue;
use crate::measures::MetricsTracker;
use crate::pattern::{new_pattern,Pattern,PatternBuilderArgument};
use crate::router::{OccupancyMap,Router,RouterBuilderArgument};
use crate::routing::{new_routing,Routing,RoutingBuilderArgument,RoutingInfo};
use crate::topology::{new_topology,Location,Topology,TopologyBuilderArgument};
use crate::workload::RingAllReduce;

///The discrete simulation time, in cycles.
pub type Time = u64;

///The semantic class of a packet. The cycle engine treats every class alike; the class travels for the consumers of the traffic.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum PacketType
{
	Read,
	Write,
	Response,
	Snoop,
}

///Position of a flit within its packet.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum FlitType
{
	Head,
	Body,
	Tail,
}

///A logical message created at a source node and destroyed when its tail flit is ejected at the destination.
#[derive(Debug)]
pub struct Packet
{
	///Unique within the simulation, monotonically increasing.
	pub id: u64,
	pub packet_type: PacketType,
	///Node that created the packet.
	pub source: usize,
	///Node that must receive the packet.
	pub destination: usize,
	pub transaction_id: u64,
	///The payload words, one per flit.
	pub payload: Vec<u32>,
	pub creation_cycle: Time,
	///Information computed while the packet travels.
	pub routing_info: RefCell<RoutingInfo>,
}

impl Packet
{
	///Number of flits of the packet.
	pub fn size(&self) -> usize
	{
		self.payload.len()
	}
}

///The unit that traverses the network. A packet of `n>=2` words travels as one head, `n-2` body and one tail flit; a one-word packet is just its head.
#[derive(Clone,Debug)]
pub struct Flit
{
	pub flit_type: FlitType,
	///The payload word this flit carries.
	pub payload: u32,
	///The packet this flit belongs to.
	pub packet: Rc<Packet>,
	///All flits of one packet travel on the same virtual channel.
	pub virtual_channel: usize,
	///Whether the hybrid engine must inject this flit into the secondary fabric.
	pub use_secondary_network: bool,
}

impl Flit
{
	///Whether the flit is leading a packet.
	pub fn is_head(&self) -> bool
	{
		matches!(self.flit_type,FlitType::Head)
	}
	///Whether this flit completes a packet. A one-word packet completes on its head.
	pub fn is_tail(&self) -> bool
	{
		matches!(self.flit_type,FlitType::Tail) || self.packet.size()==1
	}
}

///Returned by `Node::receive_flit` when a tail ejection completes a packet.
#[derive(Clone,Copy,Debug)]
pub struct PacketCompletion
{
	pub packet_id: u64,
	pub source: usize,
	pub destination: usize,
}

///Supplies the monotonically unique packet identifiers of one simulation.
///Owned by the simulator, so independent simulations do not share a counter.
#[derive(Debug,Default)]
pub struct PacketIdGenerator
{
	next_id: u64,
}

impl PacketIdGenerator
{
	pub fn new() -> PacketIdGenerator
	{
		PacketIdGenerator{
			next_id: 0,
		}
	}
	pub fn next_id(&mut self) -> u64
	{
		let id=self.next_id;
		self.next_id+=1;
		id
	}
}

///A traffic source and sink attached to a router.
///It generates packets, breaks them into flits queued for injection, and reassembles the flits ejected towards it.
#[derive(Debug)]
pub struct Node
{
	///The index of the node in the network.
	index: usize,
	///Total number of nodes, to validate destinations.
	num_nodes: usize,
	///Probability of creating a packet each cycle.
	injection_rate: f64,
	num_virtual_channels: usize,
	///Whether the packets of this node must travel the secondary fabric.
	use_secondary_network: bool,
	///Created flits not yet admitted into the attached router.
	injection_queue: VecDeque<Flit>,
	///Flits received per packet, until the tail arrives.
	reassembly_buffer: BTreeMap<u64,Vec<Flit>>,
	///Packets pushed into the injection queue.
	pub packets_sent: usize,
	///Packets whose tail was ejected here.
	pub packets_received: usize,
}

impl Node
{
	fn new(index:usize, num_nodes:usize, injection_rate:f64, num_virtual_channels:usize, use_secondary_network:bool) -> Node
	{
		Node{
			index,
			num_nodes,
			injection_rate,
			num_virtual_channels,
			use_secondary_network,
			injection_queue: VecDeque::new(),
			reassembly_buffer: BTreeMap::new(),
			packets_sent: 0,
			packets_received: 0,
		}
	}
	///The index of the node in the network.
	pub fn index(&self) -> usize
	{
		self.index
	}
	///Flits waiting to be admitted into the router.
	pub fn pending_injection(&self) -> usize
	{
		self.injection_queue.len()
	}
	///Break the packet into flits, head to tail, and append them to the injection queue.
	fn packetize(&mut self, packet:Rc<Packet>, virtual_channel:usize)
	{
		let size=packet.size();
		self.injection_queue.push_back(Flit{
			flit_type: FlitType::Head,
			payload: packet.payload[0],
			packet: packet.clone(),
			virtual_channel,
			use_secondary_network: self.use_secondary_network,
		});
		for index in 1..size.saturating_sub(1)
		{
			self.injection_queue.push_back(Flit{
				flit_type: FlitType::Body,
				payload: packet.payload[index],
				packet: packet.clone(),
				virtual_channel,
				use_secondary_network: self.use_secondary_network,
			});
		}
		if size>1
		{
			self.injection_queue.push_back(Flit{
				flit_type: FlitType::Tail,
				payload: packet.payload[size-1],
				packet: packet.clone(),
				virtual_channel,
				use_secondary_network: self.use_secondary_network,
			});
		}
		self.packets_sent+=1;
	}
	///Bernoulli generation of at most one packet, with the destination given by the pattern.
	///A single-node network has no legal destination and generates nothing.
	fn generate_traffic(&mut self, cycle:Time, pattern:&dyn Pattern, topology:&dyn Topology, packet_ids:&mut PacketIdGenerator, tracker:&mut MetricsTracker, rng:&mut StdRng)
	{
		if self.num_nodes<2
		{
			return;
		}
		if rng.gen::<f64>()>=self.injection_rate
		{
			return;
		}
		let destination=pattern.get_destination(self.index,topology,rng);
		let payload_length=rng.gen_range(1..=8);
		let payload:Vec<u32>=(0..payload_length).map(|_|rng.gen::<u32>()).collect();
		let packet=Rc::new(Packet{
			id: packet_ids.next_id(),
			packet_type: PacketType::Write,
			source: self.index,
			destination,
			transaction_id: rng.gen_range(0..65536u64),
			payload,
			creation_cycle: cycle,
			routing_info: RefCell::new(RoutingInfo::default()),
		});
		tracker.record_packet_creation(packet.id,cycle);
		let virtual_channel=rng.gen_range(0..self.num_virtual_channels);
		self.packetize(packet,virtual_channel);
	}
	///Build and enqueue one packet on behalf of the workload driver, bypassing the random generation.
	pub fn inject_workload_packet(&mut self, destination:usize, size_flits:usize, cycle:Time, transaction_id:u64, packet_ids:&mut PacketIdGenerator, tracker:&mut MetricsTracker, rng:&mut StdRng)
	{
		if size_flits==0
		{
			return;
		}
		let payload:Vec<u32>=(0..size_flits).map(|word|word as u32).collect();
		let packet=Rc::new(Packet{
			id: packet_ids.next_id(),
			packet_type: PacketType::Write,
			source: self.index,
			destination,
			transaction_id,
			payload,
			creation_cycle: cycle,
			routing_info: RefCell::new(RoutingInfo::default()),
		});
		tracker.record_packet_creation(packet.id,cycle);
		let virtual_channel=rng.gen_range(0..self.num_virtual_channels);
		self.packetize(packet,virtual_channel);
	}
	///Store the ejected flit; on the tail, complete the packet and report it.
	fn receive_flit(&mut self, flit:Flit, cycle:Time, tracker:&mut MetricsTracker) -> Option<PacketCompletion>
	{
		let is_tail=flit.is_tail();
		let packet=flit.packet.clone();
		self.reassembly_buffer.entry(packet.id).or_insert_with(Vec::new).push(flit);
		if is_tail
		{
			self.reassembly_buffer.remove(&packet.id);
			self.packets_received+=1;
			tracker.record_packet_receipt(&packet,cycle);
			Some(PacketCompletion{
				packet_id: packet.id,
				source: packet.source,
				destination: packet.destination,
			})
		}
		else
		{
			None
		}
	}
}

///An instantiated fabric: the topology, its router arena and the routing bound to them.
pub struct Network
{
	///The topology defining the connectivity.
	pub topology: Box<dyn Topology>,
	///The collection of all the routers in the fabric.
	pub routers: Vec<RefCell<Router>>,
	///The routing selected once at construction.
	pub routing: Box<dyn Routing>,
	///Depth of every virtual-channel FIFO.
	pub buffer_size: usize,
}

///The argument of the fabric builder.
#[derive(Debug)]
pub struct NetworkBuilderArgument<'a>
{
	pub topology_name: &'a str,
	pub num_nodes: usize,
	pub fat_tree_k: usize,
	pub num_virtual_channels: usize,
	pub buffer_size: usize,
	pub strict_backpressure: bool,
	pub routing_algo: &'a str,
}

impl Network
{
	pub fn new(arg:NetworkBuilderArgument) -> Network
	{
		let topology=new_topology(TopologyBuilderArgument{
			name: arg.topology_name,
			num_nodes: arg.num_nodes,
			fat_tree_k: arg.fat_tree_k,
		});
		let routing=new_routing(RoutingBuilderArgument{
			routing_algo: arg.routing_algo,
			topology: topology.as_ref(),
		});
		let routers=(0..topology.num_routers()).map(|router_index|RefCell::new(Router::new(RouterBuilderArgument{
			router_index,
			num_ports: topology.ports(router_index),
			num_virtual_channels: arg.num_virtual_channels,
			buffer_size: arg.buffer_size,
			strict_backpressure: arg.strict_backpressure,
		}))).collect();
		Network{
			topology,
			routers,
			routing,
			buffer_size: arg.buffer_size,
		}
	}
	///Snapshot of every downstream reception buffer, taken before any router of the cycle runs.
	pub fn occupancy_map(&self) -> OccupancyMap
	{
		let ports=(0..self.routers.len()).map(|router_index|{
			(0..self.topology.ports(router_index)).map(|port|{
				match self.topology.neighbour(router_index,port)
				{
					Location::RouterPort{router_index:neighbour_index,router_port:neighbour_port} => Some(self.routers[neighbour_index].borrow().virtual_channel_occupancy(neighbour_port)),
					_ => None,
				}
			}).collect()
		}).collect();
		OccupancyMap::new(ports,self.buffer_size)
	}
	///Total number of flits buffered in the routers of the fabric.
	pub fn buffered_flits(&self) -> usize
	{
		self.routers.iter().map(|router|router.borrow().buffered_flits()).sum()
	}
}

///The object representing the whole simulation.
pub struct Simulation
{
	///The whole configuration.
	pub configuration: ConfigurationValue,
	///The seed of the random number generator.
	pub seed: u64,
	///The random number generator itself, with its current state.
	pub rng: RefCell<StdRng>,
	///The primary fabric.
	pub network: Network,
	///The secondary fabric of the hybrid architecture, if any.
	pub secondary_network: Option<Network>,
	///The traffic endpoints.
	pub nodes: Vec<Node>,
	///Destination selection for the synthetic traffic. `None` when a workload drives the nodes.
	pub pattern: Option<Box<dyn Pattern>>,
	///The collective driver, when `traffic_pattern` is `"all_reduce"`.
	pub workload: Option<RingAllReduce>,
	///The statistics being collected.
	pub tracker: MetricsTracker,
	///Supplies the per-simulation packet identifiers.
	pub packet_ids: PacketIdGenerator,
	///The current cycle, i.e., the current discrete time.
	pub cycle: Time,
	///Run length stated in the configuration, for callers that follow it.
	pub simulation_cycles: Time,
	///Deadlock guard for workload-driven runs.
	pub simulation_timeout_cycles: Option<Time>,
	///Whether the workload has already injected its initial packets.
	workload_initialized: bool,
}

impl Simulation
{
	pub fn new(cv:&ConfigurationValue) -> Simulation
	{
		let mut seed:Option<u64>=None;
		let mut num_gpus=None;
		let mut topology_name="mesh".to_string();
		let mut fat_tree_k=4;
		let mut num_virtual_channels=None;
		let mut router_buffer_size=8;
		let mut routing_algo="deterministic".to_string();
		let mut strict_backpressure=false;
		let mut traffic_pattern="uniform_random".to_string();
		let mut injection_rate=0.0;
		let mut hotspot_nodes:Vec<usize>=vec![];
		let mut hotspot_rate=0.0;
		let mut simulation_cycles=0;
		let mut workload_cv=None;
		let mut simulation_timeout_cycles=None;
		let mut architecture="monolithic".to_string();
		let mut hybrid_cv=None;
		match_object_panic!(cv,"Configuration",value,
			"random_seed" => seed=Some(value.as_time().expect("bad value for random_seed")),
			"num_gpus" => num_gpus=Some(value.as_usize().expect("bad value for num_gpus")),
			"topology" => topology_name=value.as_str().expect("bad value for topology").to_string(),
			"fat_tree_k" => fat_tree_k=value.as_usize().expect("bad value for fat_tree_k"),
			"num_virtual_channels" => num_virtual_channels=Some(value.as_usize().expect("bad value for num_virtual_channels")),
			"router_buffer_size" => router_buffer_size=value.as_usize().expect("bad value for router_buffer_size"),
			"routing_algo" => routing_algo=value.as_str().expect("bad value for routing_algo").to_string(),
			"strict_backpressure" => strict_backpressure=value.as_bool().expect("bad value for strict_backpressure"),
			"traffic_pattern" => traffic_pattern=value.as_str().expect("bad value for traffic_pattern").to_string(),
			"injection_rate" => injection_rate=value.as_f64().expect("bad value for injection_rate"),
			"hotspot_nodes" => hotspot_nodes=value.as_array().expect("bad value for hotspot_nodes").iter()
				.map(|v|v.as_usize().expect("bad value in hotspot_nodes")).collect(),
			"hotspot_rate" => hotspot_rate=value.as_f64().expect("bad value for hotspot_rate"),
			"simulation_cycles" => simulation_cycles=value.as_time().expect("bad value for simulation_cycles"),
			"workload" => workload_cv=Some(value),
			"simulation_timeout_cycles" => simulation_timeout_cycles=Some(value.as_time().expect("bad value for simulation_timeout_cycles")),
			"architecture" => architecture=value.as_str().expect("bad value for architecture").to_string(),
			"hybrid_electrical_config" => hybrid_cv=Some(value),
		);
		let num_gpus=num_gpus.expect("There were no num_gpus");
		let num_virtual_channels=num_virtual_channels.expect("There were no num_virtual_channels");
		assert!(num_virtual_channels>=1,"there must be at least one virtual channel");
		assert!((0.0..=1.0).contains(&injection_rate),"injection_rate must be a probability");
		let seed=seed.unwrap_or_else(||{
			let drawn=::rand::random::<u64>();
			info!("random_seed not given, drew {}",drawn);
			drawn
		});
		let rng=RefCell::new(StdRng::seed_from_u64(seed));
		let network=Network::new(NetworkBuilderArgument{
			topology_name: &topology_name,
			num_nodes: num_gpus,
			fat_tree_k,
			num_virtual_channels,
			buffer_size: router_buffer_size,
			strict_backpressure,
			routing_algo: &routing_algo,
		});
		let mut secondary_traffic:Vec<String>=vec![];
		let secondary_network=match architecture.as_ref()
		{
			"monolithic" => None,
			"hybrid_electrical" =>
			{
				let hybrid_cv=hybrid_cv.expect("There were no hybrid_electrical_config");
				let mut secondary_topology=None;
				match_object_panic!(hybrid_cv,"HybridElectricalConfig",value,
					"secondary_topology" => secondary_topology=Some(value.as_str().expect("bad value for secondary_topology").to_string()),
					"secondary_traffic" => secondary_traffic=value.as_array().expect("bad value for secondary_traffic").iter()
						.map(|v|v.as_str().expect("bad value in secondary_traffic").to_string()).collect(),
				);
				let secondary_topology=secondary_topology.expect("There were no secondary_topology");
				Some(Network::new(NetworkBuilderArgument{
					topology_name: &secondary_topology,
					num_nodes: num_gpus,
					fat_tree_k,
					num_virtual_channels,
					buffer_size: router_buffer_size,
					strict_backpressure,
					routing_algo: &routing_algo,
				}))
			},
			_ => panic!("Unknown architecture {}",architecture),
		};
		let use_secondary=secondary_traffic.iter().any(|pattern_name|pattern_name==&traffic_pattern);
		let (pattern,workload)=if traffic_pattern=="all_reduce"
		{
			(None,Some(RingAllReduce::new(workload_cv,num_gpus)))
		}
		else
		{
			let mut pattern=new_pattern(PatternBuilderArgument{
				name: &traffic_pattern,
				hotspot_nodes: &hotspot_nodes,
				hotspot_rate,
			});
			pattern.initialize(num_gpus,num_gpus,network.topology.as_ref(),&mut rng.borrow_mut());
			(Some(pattern),None)
		};
		let nodes=(0..num_gpus).map(|index|Node::new(index,num_gpus,injection_rate,num_virtual_channels,use_secondary)).collect();
		Simulation{
			configuration: cv.clone(),
			seed,
			rng,
			network,
			secondary_network,
			nodes,
			pattern,
			workload,
			tracker: MetricsTracker::new(),
			packet_ids: PacketIdGenerator::new(),
			cycle: 0,
			simulation_cycles,
			simulation_timeout_cycles,
			workload_initialized: false,
		}
	}
	///Step 1 of the cycle: every router of the fabric decides its forwardings over the pre-cycle occupancy snapshot.
	fn fabric_decisions(network:&Network, rng:&mut StdRng) -> Vec<Vec<(usize,Flit)>>
	{
		let occupancy=network.occupancy_map();
		network.routers.iter().map(|router|router.borrow_mut().process_cycle(network.routing.as_ref(),network.topology.as_ref(),&occupancy,rng)).collect()
	}
	///Step 2 of the cycle: move the forwarded flits into the neighbour routers, counting the hop of each head flit.
	///Flits leaving through node ports are collected into `deliveries` for step 4.
	fn transfer_flits(network:&Network, decisions:Vec<Vec<(usize,Flit)>>, deliveries:&mut Vec<(usize,Flit)>)
	{
		for (router_index,forwarded) in decisions.into_iter().enumerate()
		{
			for (out_port,flit) in forwarded
			{
				match network.topology.neighbour(router_index,out_port)
				{
					Location::RouterPort{router_index:neighbour_index,router_port:neighbour_port} =>
					{
						if flit.is_head()
						{
							flit.packet.routing_info.borrow_mut().hops+=1;
						}
						network.routers[neighbour_index].borrow_mut().insert(neighbour_port,flit);
					},
					Location::NodePort(node_index) => deliveries.push((node_index,flit)),
					Location::None => warn!("router {} forwarded a flit through the non-connected port {}",router_index,out_port),
				}
			}
		}
	}
	/**
	Execute a single cycle of the simulation, in the fixed order:
	1. every router computes routes and arbitrates over a consistent pre-cycle snapshot;
	2. winning flits move into the neighbour input buffers;
	3. each node admits one flit into its attached router;
	4. flits leaving through node ports are delivered, completions notify the workload;
	5. without a workload, the generators produce the traffic of the next cycle;
	6. the clock advances.
	**/
	pub fn advance(&mut self)
	{
		let cycle=self.cycle;
		let mut rng_guard=self.rng.borrow_mut();
		let rng=&mut *rng_guard;
		//1: routing and arbitration. All reads of this step happen before any write below.
		let primary_decisions=Simulation::fabric_decisions(&self.network,rng);
		let secondary_decisions=match self.secondary_network
		{
			Some(ref network) => Some(Simulation::fabric_decisions(network,rng)),
			None => None,
		};
		//2: inter-router transfers; ejections are deferred to step 4.
		let mut deliveries:Vec<(usize,Flit)>=Vec::new();
		Simulation::transfer_flits(&self.network,primary_decisions,&mut deliveries);
		if let Some(decisions)=secondary_decisions
		{
			let network=self.secondary_network.as_ref().expect("the decisions came from a secondary fabric");
			Simulation::transfer_flits(network,decisions,&mut deliveries);
		}
		//3: admit one flit per node into the fabric the flit belongs to.
		for node in self.nodes.iter_mut()
		{
			if let Some(flit)=node.injection_queue.pop_front()
			{
				let network=if flit.use_secondary_network
				{
					self.secondary_network.as_ref().expect("a flit for the secondary fabric without a hybrid architecture")
				}
				else
				{
					&self.network
				};
				match network.topology.node_neighbour(node.index)
				{
					Location::RouterPort{router_index,router_port} => network.routers[router_index].borrow_mut().insert(router_port,flit),
					_ => panic!("node {} is not attached to a router",node.index),
				}
			}
		}
		//4: eject into the nodes; completions feed the workload.
		for (node_index,flit) in deliveries
		{
			let completion=self.nodes[node_index].receive_flit(flit,cycle,&mut self.tracker);
			if let (Some(ref mut workload),Some(completion))=(&mut self.workload,completion)
			{
				workload.on_packet_received(completion.destination,completion.source,cycle,&mut self.nodes,&mut self.packet_ids,&mut self.tracker,rng);
			}
		}
		//5: generators produce the traffic for the next cycle.
		if self.workload.is_none()
		{
			let pattern=self.pattern.as_ref().expect("synthetic traffic requires a pattern").as_ref();
			let topology=self.network.topology.as_ref();
			for node in self.nodes.iter_mut()
			{
				node.generate_traffic(cycle,pattern,topology,&mut self.packet_ids,&mut self.tracker,rng);
			}
		}
		//6
		self.cycle+=1;
	}
	///Run the simulation for at most `num_cycles` cycles.
	///A workload-driven run stops earlier upon completion, or when `simulation_timeout_cycles` is exceeded, reporting partial metrics.
	pub fn run(&mut self, num_cycles:Time)
	{
		if self.workload.is_some() && !self.workload_initialized
		{
			self.workload_initialized=true;
			let mut rng_guard=self.rng.borrow_mut();
			let rng=&mut *rng_guard;
			if let Some(ref mut workload)=self.workload
			{
				workload.initialize(self.cycle,&mut self.nodes,&mut self.packet_ids,&mut self.tracker,rng);
			}
		}
		let end_cycle=self.cycle+num_cycles;
		while self.cycle<end_cycle
		{
			if self.workload.is_some()
			{
				if let Some(limit)=self.simulation_timeout_cycles
				{
					if self.cycle>=limit
					{
						log::error!("the workload did not complete within {} cycles, stopping with partial metrics",limit);
						return;
					}
				}
			}
			self.advance();
			if self.cycle%100==0
			{
				debug!("--- cycle {} ---",self.cycle);
			}
			if let Some(ref workload)=self.workload
			{
				if workload.is_complete()
				{
					info!("[{}] ring all-reduce complete",self.cycle);
					return;
				}
			}
		}
	}
	///Whether the workload, if any, has finished. Synthetic runs never report completion.
	pub fn is_complete(&self) -> bool
	{
		match self.workload
		{
			Some(ref workload) => workload.is_complete(),
			None => false,
		}
	}
	///Summary of the run as a configuration object, for the external reporters.
	pub fn get_simulation_results(&self) -> ConfigurationValue
	{
		let packets_sent:usize=self.nodes.iter().map(|node|node.packets_sent).sum();
		ConfigurationValue::Object("Result".to_string(),vec![
			("cycle".to_string(),ConfigurationValue::Number(self.cycle as f64)),
			("packets_sent".to_string(),ConfigurationValue::Number(packets_sent as f64)),
			("packets_received".to_string(),ConfigurationValue::Number(self.tracker.received_packets() as f64)),
			("average_packet_latency".to_string(),ConfigurationValue::Number(self.tracker.calculate_average_latency())),
			("throughput".to_string(),ConfigurationValue::Number(self.tracker.calculate_throughput(self.cycle,self.nodes.len()))),
			("average_packet_hops".to_string(),ConfigurationValue::Number(self.tracker.average_packet_hops())),
		])
	}
}

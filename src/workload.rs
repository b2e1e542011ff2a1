
/*!

The ring all-reduce workload driver.

Instead of Bernoulli generation, the nodes are driven by a state machine reproducing the request cadence of a ring all-reduce of `D` data chunks: for each chunk, `N-1` scatter-reduce steps followed by `N-1` all-gather steps, every node sending one packet per step to its ring successor and waiting for one from its ring predecessor.

*/

use ::rand::rngs::StdRng;
use log::info;

use crate::config::ConfigurationValue;
use crate::match_object_panic;
use crate::measures::MetricsTracker;
use crate::{Node,PacketIdGenerator,Time};

///The phase of a node within the collective.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum CollectivePhase
{
	Idle,
	ScatterReduce,
	AllGather,
}

///Progress of one node through the collective.
#[derive(Clone,Debug)]
struct NodeCollectiveState
{
	phase: CollectivePhase,
	///Steps completed within the current phase, from 0 to N-2.
	step: usize,
	///Chunks fully reduced and gathered so far.
	chunk_index: usize,
}

/**
Sequencer of a ring all-reduce.

Built from the `workload` configuration object:
```ignore
Workload
{
	all_reduce_data_size: 2,
	all_reduce_chunk_size_flits: 4,
}
```

`initialize` puts every node in the scatter-reduce phase and injects its first packet. Each packet reception advances the state of the receiving node and triggers its next injection, so the collective is self-clocked by the network. When a node finishes the all-gather of its last chunk it goes idle; [is_complete](RingAllReduce::is_complete) holds when every node is idle, at which point the driver has injected exactly `N*(N-1)*2*D` packets.
**/
#[derive(Debug)]
pub struct RingAllReduce
{
	///Number of data chunks `D`.
	data_size: usize,
	///Flits of each packet.
	chunk_size_flits: usize,
	states: Vec<NodeCollectiveState>,
}

impl RingAllReduce
{
	pub fn new(cv:Option<&ConfigurationValue>, num_nodes:usize) -> RingAllReduce
	{
		let mut data_size=1;
		let mut chunk_size_flits=4;
		if let Some(cv)=cv
		{
			match_object_panic!(cv,"Workload",value,
				"all_reduce_data_size" => data_size=value.as_usize().expect("bad value for all_reduce_data_size"),
				"all_reduce_chunk_size_flits" => chunk_size_flits=value.as_usize().expect("bad value for all_reduce_chunk_size_flits"),
			);
		}
		RingAllReduce{
			data_size,
			chunk_size_flits,
			states: vec![NodeCollectiveState{phase:CollectivePhase::Idle,step:0,chunk_index:0};num_nodes],
		}
	}
	///Start the collective: every node enters scatter-reduce and sends its first packet.
	///With fewer than two nodes, or nothing to reduce, the collective is trivially complete.
	pub fn initialize(&mut self, cycle:Time, nodes:&mut [Node], packet_ids:&mut PacketIdGenerator, tracker:&mut MetricsTracker, rng:&mut StdRng)
	{
		let num_nodes=self.states.len();
		info!("[{}] starting ring all-reduce over {} nodes, {} chunks of {} flits",cycle,num_nodes,self.data_size,self.chunk_size_flits);
		if self.data_size==0 || num_nodes<2
		{
			return;
		}
		for node_index in 0..num_nodes
		{
			self.states[node_index].phase=CollectivePhase::ScatterReduce;
			self.send_next_packet(node_index,cycle,nodes,packet_ids,tracker,rng);
		}
	}
	///Event hook called by the engine when a workload packet completes at `node_index`.
	pub fn on_packet_received(&mut self, node_index:usize, _source:usize, cycle:Time, nodes:&mut [Node], packet_ids:&mut PacketIdGenerator, tracker:&mut MetricsTracker, rng:&mut StdRng)
	{
		let num_nodes=self.states.len();
		{
			let state=&mut self.states[node_index];
			if state.phase==CollectivePhase::Idle
			{
				return;
			}
			//The phase has N-1 steps; the packet closing step N-2 completes it.
			let phase_complete=state.step+2==num_nodes;
			match state.phase
			{
				CollectivePhase::ScatterReduce if phase_complete =>
				{
					state.phase=CollectivePhase::AllGather;
					state.step=0;
				},
				CollectivePhase::AllGather if phase_complete =>
				{
					state.chunk_index+=1;
					if state.chunk_index>=self.data_size
					{
						state.phase=CollectivePhase::Idle;
					}
					else
					{
						state.phase=CollectivePhase::ScatterReduce;
						state.step=0;
					}
				},
				_ => state.step+=1,
			}
		}
		self.send_next_packet(node_index,cycle,nodes,packet_ids,tracker,rng);
	}
	///Issue the next packet of the node towards its ring successor. No-op on idle nodes.
	fn send_next_packet(&mut self, node_index:usize, cycle:Time, nodes:&mut [Node], packet_ids:&mut PacketIdGenerator, tracker:&mut MetricsTracker, rng:&mut StdRng)
	{
		let num_nodes=self.states.len();
		let state=&self.states[node_index];
		if state.phase==CollectivePhase::Idle
		{
			return;
		}
		let destination=(node_index+1)%num_nodes;
		let gathering=if state.phase==CollectivePhase::AllGather { 1u64 } else { 0u64 };
		let transaction_id=((node_index as u64)<<20) | ((state.chunk_index as u64)<<12) | (gathering<<8) | state.step as u64;
		nodes[node_index].inject_workload_packet(destination,self.chunk_size_flits,cycle,transaction_id,packet_ids,tracker,rng);
	}
	///Whether every node has finished every chunk.
	pub fn is_complete(&self) -> bool
	{
		self.states.iter().all(|state|state.phase==CollectivePhase::Idle)
	}
	///The phase the node is currently in.
	pub fn node_phase(&self, node_index:usize) -> CollectivePhase
	{
		self.states[node_index].phase
	}
}

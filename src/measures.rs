/*!

Module encapsulating the statistics about several measures.

The values reported by `Simulation::get_simulation_results` are:
* `cycle` is the last simulated cycle.
* `packets_sent` is the total number of packets the nodes have pushed into their injection queues.
* `packets_received` is the total number of packets whose tail flit has been ejected at its destination.
* `average_packet_latency` is the average, over received packets, of the ejection cycle minus the creation cycle. It is 0 when no packet has been received.
* `throughput` is the number of received packets divided by the simulated cycles.
* `average_packet_hops` is the average number of router-to-router hops traveled by the received packets.

*/

use std::collections::BTreeMap;

use crate::{Packet,Time};

///Tracks every packet from its creation at a node until its tail flit is ejected at the destination.
///In-flight packets live in the creation map; received packets contribute one entry to the latency and hop lists.
#[derive(Debug,Default)]
pub struct MetricsTracker
{
	///`packet_id -> creation_cycle` for the packets currently inside injection queues or the network.
	packet_creation_times: BTreeMap<u64,Time>,
	///One entry per received packet, in order of reception.
	packet_latencies: Vec<Time>,
	///Router-to-router hops of each received packet, in order of reception.
	packet_hops: Vec<usize>,
}

impl MetricsTracker
{
	pub fn new() -> MetricsTracker
	{
		MetricsTracker{
			packet_creation_times: BTreeMap::new(),
			packet_latencies: Vec::new(),
			packet_hops: Vec::new(),
		}
	}
	///Called by the nodes when a packet is created and packetized.
	pub fn record_packet_creation(&mut self, packet_id:u64, creation_cycle:Time)
	{
		self.packet_creation_times.insert(packet_id,creation_cycle);
	}
	///Called by the nodes when the tail flit of a packet is ejected.
	///Packets without a recorded creation are ignored.
	pub fn record_packet_receipt(&mut self, packet:&Packet, receipt_cycle:Time)
	{
		if let Some(creation_cycle) = self.packet_creation_times.remove(&packet.id)
		{
			self.packet_latencies.push(receipt_cycle-creation_cycle);
			self.packet_hops.push(packet.routing_info.borrow().hops);
		}
	}
	///Average end-to-end latency in cycles of the received packets. 0 if none was received.
	pub fn calculate_average_latency(&self) -> f64
	{
		if self.packet_latencies.is_empty()
		{
			return 0.0;
		}
		self.packet_latencies.iter().sum::<Time>() as f64 / self.packet_latencies.len() as f64
	}
	///Received packets per cycle.
	pub fn calculate_throughput(&self, num_cycles:Time, num_nodes:usize) -> f64
	{
		if num_cycles==0 || num_nodes==0
		{
			return 0.0;
		}
		self.packet_latencies.len() as f64 / num_cycles as f64
	}
	///Average number of router-to-router hops of the received packets. 0 if none was received.
	pub fn average_packet_hops(&self) -> f64
	{
		if self.packet_hops.is_empty()
		{
			return 0.0;
		}
		self.packet_hops.iter().sum::<usize>() as f64 / self.packet_hops.len() as f64
	}
	///The greatest number of router-to-router hops seen on a received packet.
	pub fn maximum_packet_hops(&self) -> usize
	{
		self.packet_hops.iter().copied().max().unwrap_or(0)
	}
	///Number of packets whose tail has already been ejected.
	pub fn received_packets(&self) -> usize
	{
		self.packet_latencies.len()
	}
	///Number of packets created and not yet received.
	pub fn in_flight_packets(&self) -> usize
	{
		self.packet_creation_times.len()
	}
	///The latency of every received packet, in reception order.
	pub fn latencies(&self) -> &[Time]
	{
		&self.packet_latencies
	}
	///The hop count of every received packet, in reception order.
	pub fn hop_counts(&self) -> &[usize]
	{
		&self.packet_hops
	}
}

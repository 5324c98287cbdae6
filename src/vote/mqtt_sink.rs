//! Publishes votes as JSON over MQTT

use crate::config::VoteConfig;
use crate::vote::{VoteError, VoteRecord, VoteSink};
use rumqttc::{AsyncClient, Event, MqttOptions, Packet, QoS};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

pub struct MqttVoteSink {
    client: AsyncClient,
    topic_prefix: String,
    event_loop_task: JoinHandle<()>,
}

impl MqttVoteSink {
    /// Connects lazily; the event loop task keeps reconnecting in the background.
    /// Must be called inside a tokio runtime.
    pub fn spawn(config: &VoteConfig) -> Self {
        info!(
            "Starting vote publisher for {}:{} under '{}'",
            config.host, config.port, config.topic_prefix
        );
        let mut mqtt_options = MqttOptions::new(&config.client_id, &config.host, config.port);
        mqtt_options.set_keep_alive(Duration::from_secs(5));
        if let Some(user) = &config.user {
            mqtt_options.set_credentials(user, config.password.clone().unwrap_or_default());
        }

        let (client, mut event_loop) = AsyncClient::new(mqtt_options, 100);

        let handle = tokio::spawn(async move {
            loop {
                match event_loop.poll().await {
                    Ok(Event::Incoming(Packet::PubAck(ack))) => {
                        debug!("Vote acknowledged (pkid {})", ack.pkid);
                    }
                    Ok(Event::Incoming(Packet::ConnAck(_))) => {
                        info!("Vote broker connected");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!("Vote broker connection error: {}", e);
                        tokio::time::sleep(Duration::from_secs(1)).await;
                    }
                }
            }
        });

        Self {
            client,
            topic_prefix: config.topic_prefix.clone(),
            event_loop_task: handle,
        }
    }
}

pub fn vote_topic(prefix: &str, id: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        id.to_string()
    } else {
        format!("{}/{}", prefix, id)
    }
}

impl VoteSink for MqttVoteSink {
    fn submit_vote(&self, record: &VoteRecord) -> Result<(), VoteError> {
        let payload = serde_json::to_vec(record)?;
        let topic = vote_topic(&self.topic_prefix, &record.id);
        self.client
            .try_publish(topic.as_str(), QoS::AtLeastOnce, false, payload)
            .map_err(|e| VoteError::PublishError(e.to_string()))?;
        info!("Vote {} queued on {}", record.id, topic);
        Ok(())
    }
}

impl Drop for MqttVoteSink {
    fn drop(&mut self) {
        self.event_loop_task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_joins_prefix_and_id() {
        assert_eq!(vote_topic("votes2", "ev_1"), "votes2/ev_1");
        assert_eq!(vote_topic("votes2/", "ev_1"), "votes2/ev_1");
        assert_eq!(vote_topic("", "ev_1"), "ev_1");
    }
}

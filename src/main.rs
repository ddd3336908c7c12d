use shapley::{ValueFunction, compute_shapley_values};

fn main() {
    // The speakers game: a Spanish speaker, a French speaker, and a
    // bilingual translator; any pair (or more) unlocks the full 1200.
    let mut speakers = ValueFunction::new();
    speakers.insert(vec!["spanish"], 0.0);
    speakers.insert(vec!["french"], 0.0);
    speakers.insert(vec!["bilingual"], 1200.0);
    speakers.insert(vec!["spanish", "french"], 1200.0);
    speakers.insert(vec!["spanish", "bilingual"], 1200.0);
    speakers.insert(vec!["french", "bilingual"], 1200.0);
    speakers.insert(vec!["spanish", "french", "bilingual"], 1200.0);

    match compute_shapley_values(vec!["spanish", "french", "bilingual"], speakers) {
        Err(e) => eprintln!("Error computing Shapley values: {e}"),
        Ok(values) => {
            println!("Speakers game:");
            for (player, sv) in values {
                println!(
                    "  {player}: {:.2} ({:.1}%)",
                    sv.value,
                    sv.proportion * 100.0
                );
            }
        }
    }

    // The crew team game: five rowers and a coxswain. The boat scores 10
    // with four rowers plus the coxswain, and only 2 with all five rowers
    // alone.
    let rowers = ["rower1", "rower2", "rower3", "rower4", "rower5"];
    let coxswain = "coxswain";
    let players: Vec<&str> = rowers.iter().copied().chain([coxswain]).collect();

    let mut crew = ValueFunction::new();
    for mask in 1u32..(1 << players.len()) {
        let members: Vec<&str> = (0..players.len())
            .filter(|bit| mask & (1 << bit) != 0)
            .map(|bit| players[bit])
            .collect();
        crew.insert(members, 0.0);
    }
    crew.insert(rowers.to_vec(), 2.0);
    for skipped in rowers {
        let members: Vec<&str> = players
            .iter()
            .copied()
            .filter(|&p| p != skipped)
            .collect();
        crew.insert(members, 10.0);
    }
    crew.insert(players.clone(), 10.0);

    match compute_shapley_values(players, crew) {
        Err(e) => eprintln!("Error computing Shapley values: {e}"),
        Ok(values) => {
            println!("Crew team game:");
            for (player, sv) in values {
                println!(
                    "  {player}: {:.2} ({:.1}%)",
                    sv.value,
                    sv.proportion * 100.0
                );
            }
        }
    }
}

//! The built-in "Consequence" story: one night in a quarantined apartment block.

use crate::core::Stat;
use crate::story::{Choice, Condition, Effect, Ending, Scene, Story, DEFAULT_ENDING_ID, TERMINAL_SCENE_ID};

pub const STORY_ID: &str = "consequence";

pub fn consequence() -> Story {
    let mut story = Story::new(STORY_ID, "Consequence");
    story.description =
        "Your neighbor is bitten. The Bloom hums in the walls. Every choice leaves a mark.".to_string();
    story.author = "Consequence authors".to_string();
    story.default_ending_id = Some(DEFAULT_ENDING_ID.to_string());

    for ending in endings() {
        story.add_ending(ending);
    }
    for scene in scenes() {
        story.add_scene(scene);
    }
    story
}

fn endings() -> Vec<Ending> {
    vec![
        Ending::new(
            "ending_bloomborne",
            "Bloomborne",
            "You listened to the whisper until it answered back. Filaments under skin. You became the song the city hums.",
            vec![Condition::flag("bloomChoice")],
        ),
        Ending::new(
            "ending_tyrant",
            "Tyrant of the Block",
            "You seized control and carved order from fear. Survivors live, but flinch when floorboards creak.",
            vec![
                Condition::stat_at_most(Stat::Morality, -45),
                Condition::stat_below(Stat::Trauma, 80),
            ],
        ),
        Ending::new(
            "ending_manipulator",
            "Smiling Knives",
            "Debts, favors, secrets. Your web held the city. No one can point to a weapon, only to your smile.",
            vec![Condition::flag("manipulator")],
        ),
        Ending::new(
            "ending_ghost",
            "The Ghost in the Vents",
            "You vanished between walls and rooftops. A rumor with a heartbeat.",
            vec![Condition::flag("stalker")],
        ),
        Ending::new(
            "ending_saint",
            "Saint of Ashes",
            "You spent yourself saving the broken. Mercy cost you much, but the world remembers kindness.",
            vec![Condition::stat_at_least(Stat::Morality, 45)],
        ),
        Ending::new(
            DEFAULT_ENDING_ID,
            "Alone On Purpose",
            "You chose yourself over the many. In the quiet, you learned the shape of your own shadow.",
            vec![Condition::flag("loneWolf")],
        ),
    ]
}

fn scenes() -> Vec<Scene> {
    vec![
        Scene::new(
            "intro",
            "A low, desperate pounding rattles your door. Alex, your neighbor, pleads: 'Please. I got bit.' The hall reeks of disinfectant and wet mold.",
        )
        .with_choice(Choice::new("help_alex", "Unbolt the door and help Alex inside", "alex_inside").with_delta(6, 0, 4))
        .with_choice(Choice::new("stay_silent", "Stay silent and hold your breath", "silence_wait").with_delta(-4, 0, 2))
        .with_choice(Choice::new("question_alex", "Talk through the door and test what he admits", "interrogate_alex"))
        .with_choice(Choice::new("window_escape", "Climb out the window to the fire escape", "alley_drop").with_delta(0, 0, 6)),

        Scene::new(
            "alex_inside",
            "Alex stumbles in. The bite is a crescent of purpled teeth. He's shaking. 'Don't let me turn.'",
        )
        .with_on_enter(vec![Effect::set_flag("metAlex")])
        .with_choice(Choice::new("treat", "Clean and dress the wound; keep him calm", "treat_wound").with_delta(0, 5, 0))
        .with_choice(Choice::new("bind", "Tie him to a chair 'for safety'", "bind_alex").with_delta(-2, 0, 0))
        .with_choice(Choice::new("exploit", "Promise help if he signs over supplies", "exploit_alex").sets_flag("manipulator"))
        .with_choice(Choice::new("mercy_kill", "Whisper an apology and end it quickly", "mercy_kill_alex").with_delta(-12, 12, 0)),

        Scene::new(
            "silence_wait",
            "The pounding fades. Steps drag down the stairs. You count to one hundred before your lungs beg for air.",
        )
        .with_choice(Choice::new("follow", "Shadow him at a distance", "stalker_tail").sets_flag("stalker"))
        .with_choice(Choice::new("barricade", "Reinforce the door and take stock", "room_inventory").with_delta(0, 0, -4))
        .with_choice(Choice::new("late_call", "Call out, too late, and hear nothing", "room_inventory").with_delta(-1, 0, 0))
        .with_choice(Choice::new("window_exit", "Slip out the window after him", "alley_drop")),

        Scene::new(
            "interrogate_alex",
            "'What happened?' you ask through the door. He sobs about a stairwell ambush and a nest that sings under the maintenance lights.",
        )
        .with_choice(Choice::new("negotiate", "Offer help in exchange for his keys", "exploit_alex_from_door").sets_flag("manipulator"))
        .with_choice(Choice::new("warn_off", "Tell him to leave before others hear", "silence_wait").with_delta(-3, 0, 0))
        .with_choice(Choice::new("let_in", "Open up after all", "alex_inside").with_delta(3, 0, 0))
        .with_choice(Choice::new("record", "Record his promises for leverage", "room_inventory").sets_flag("manipulator")),

        Scene::new(
            "alley_drop",
            "You lower yourself to the fire escape. A rung slick with algae slides. You land hard; filaments shimmer in the puddles.",
        )
        .with_choice(Choice::new("scavenge", "Scavenge the dumpsters", "find_cache"))
        .with_choice(Choice::new("leave_city", "Head toward the river alone", "lone_walk").sets_flag("loneWolf"))
        .with_choice(Choice::new("listen", "Listen to the distant hum of the Bloom's song", "bloom_listen"))
        .with_choice(Choice::new("circle_back", "Circle back to the lobby entrance", "lobby_crossroads")),

        Scene::new(
            "treat_wound",
            "You boil water, clean the bite, keep Alex talking. He laughs once, thin, and thanks you. The fever climbs.",
        )
        .with_choice(Choice::new("stay_with", "Stay with him through the night", "care_night").with_delta(4, 0, 3))
        .with_choice(Choice::new("seek_help", "Go find antibiotics at the pharmacy", "pharmacy_run"))
        .with_choice(Choice::new("plan_escape", "Plan an evacuation for both of you", "evac_plan"))
        .with_choice(Choice::new("test_light", "Test the wound under a pulsing lamp", "bloom_test")),

        Scene::new(
            "bind_alex",
            "Rope bites his wrists. 'Just until we're sure,' you say. His eyes don't leave your hands.",
        )
        .with_choice(Choice::new("comfort", "Offer water and a story", "treat_wound").with_delta(1, 0, 0))
        .with_choice(Choice::new("interrogate", "Ask about his supplies and contacts", "exploit_alex").sets_flag("manipulator"))
        .with_choice(Choice::new("threaten", "Remind him who has the knife", "extract_tribute").with_delta(-5, 2, 0).sets_flag("manipulator"))
        .with_choice(Choice::new("leave_bound", "Leave him and go loot", "find_cache").with_delta(-6, 0, 0)),

        Scene::new(
            "exploit_alex",
            "Alex has pantry keys, generator fuel, neighbors who trust him. He'll trade anything for hope.",
        )
        .with_choice(Choice::new("paper_sign", "Make him sign an IOU for half his stash", "paper_signed").sets_flag("manipulator"))
        .with_choice(Choice::new("lie_cure", "Lie about a cure to secure obedience", "paper_signed").with_delta(-8, 0, 0).sets_flag("manipulator"))
        .with_choice(Choice::new("relent", "Help without strings", "treat_wound").with_delta(6, 0, 0))
        .with_choice(Choice::new("sell_out", "Call the Purifiers and sell his location", "route_purifiers").with_delta(-10, 4, 0).sets_flag("manipulator")),

        Scene::new(
            "exploit_alex_from_door",
            "Through the wood you barter. Keys slide under the gap, his hands trembling.",
        )
        .with_choice(Choice::new("take_keys", "Take the keys and send him away", "room_inventory").with_delta(-6, 0, 0).sets_flag("manipulator"))
        .with_choice(Choice::new("open_after", "Open the door now that you have leverage", "alex_inside"))
        .with_choice(Choice::new("keep_recording", "Keep recording every promise", "room_inventory").sets_flag("manipulator"))
        .with_choice(Choice::new("apologize", "Apologize and refuse the trade", "silence_wait").with_delta(2, 0, 0)),

        Scene::new(
            "mercy_kill_alex",
            "You do not miss. The room rings. The Bloom's hum answers from the walls like distant rain.",
        )
        .with_choice(Choice::new("wipe_blade", "Wipe the blade and breathe", "room_inventory"))
        .with_choice(Choice::new("leave_now", "Leave before the neighbors come", "alley_drop"))
        .with_choice(Choice::new("sit", "Sit with him until the room stops spinning", "room_inventory").with_delta(0, 6, 0))
        .with_choice(Choice::new("call_purifiers", "Call the Purifiers to claim the bounty", "route_purifiers").with_delta(-6, 0, 0)),

        Scene::new(
            "stalker_tail",
            "You move like a rumor. Alex limps toward the lobby, stopping to cough pink.",
        )
        .with_on_enter(vec![Effect::set_flag("stalker")])
        .with_choice(Choice::new("shadow_more", "Shadow him to the street", "lobby_crossroads").sets_flag("stalker"))
        .with_choice(Choice::new("pick_pocket", "Lift his wallet on the landing", "room_inventory").with_delta(-2, 0, 0))
        .with_choice(Choice::new("mark_route", "Note the Bloom clusters he avoids", "bloom_listen"))
        .with_choice(Choice::new("abort", "Return home, unheard", "room_inventory")),

        Scene::new(
            "find_cache",
            "Behind a loose brick, a cache: bandages, two protein bars, a strange tuning fork etched with circles.",
        )
        .with_choice(Choice::new("take_all", "Take everything and move on", "lobby_crossroads").with_delta(0, 0, -2))
        .with_choice(Choice::new("leave_some", "Leave one bar for whoever comes next", "lobby_crossroads").with_delta(2, 0, 0))
        .with_choice(Choice::new("study_fork", "Strike the fork and listen to the walls", "bloom_listen"))
        .with_choice(Choice::new("stash", "Create a new stash elsewhere", "lone_walk").sets_flag("loneWolf")),

        Scene::new(
            "bloom_test",
            "Under the pulsing light the veins contract, then reach. The Bloom hates some frequencies and loves others.",
        )
        .with_choice(Choice::new("note_science", "Record the frequencies that repel it", "room_inventory").sets_flag("bloomInsight"))
        .with_choice(
            Choice::new("note_ecstasy", "Record the frequencies that make it sing", "room_inventory")
                .with_after(vec![Effect::set_flag("bloomChoice"), Effect::set_flag("bloomInsight")]),
        )
        .with_choice(Choice::new("do_nothing", "Turn off the light and pretend you saw nothing", "room_inventory"))
        .with_choice(Choice::new("panic", "Panic and step away", "room_inventory").with_delta(0, 4, 0)),

        Scene::new(
            "bloom_listen",
            "You press the tuning fork to the railing. In the metal, a chord blooms: low, tender, hungry.",
        )
        .with_choice(Choice::new("resist", "Resist the harmony; memorize its shape", "lobby_crossroads").sets_flag("bloomInsight"))
        .with_choice(Choice::new("answer", "Hum back until your teeth vibrate", "finale_bridge").with_delta(0, -4, 0).sets_flag("bloomChoice"))
        .with_choice(Choice::new("smash", "Smash the fork and move on", "lobby_crossroads"))
        .with_choice(Choice::new("keep", "Pocket the fork for later", "lobby_crossroads")),

        Scene::new(
            "lobby_crossroads",
            "In the lobby: a barricaded door to the street, a pharmacy sign across the avenue, and Purifier graffiti: WE BURN WHAT SINGS.",
        )
        .with_choice(Choice::new("pharmacy", "Dash to the pharmacy for meds", "pharmacy_run"))
        .with_choice(Choice::new("purifiers", "Approach the Purifier checkpoint", "route_purifiers"))
        .with_choice(Choice::new("back_upstairs", "Return upstairs to Alex", "alex_inside"))
        .with_choice(Choice::new("river", "Head toward the river alone", "lone_walk").sets_flag("loneWolf")),

        Scene::new(
            "pharmacy_run",
            "Shadows crowd the aisles. You grab antibiotics and gauze. Something rustles above the ceiling tiles.",
        )
        .with_choice(Choice::new("sneak", "Sneak out the back with what you can carry", "finale_bridge").with_delta(0, 0, 2))
        .with_choice(Choice::new("help_stranger", "A stranger hisses for help; help them", "finale_bridge").with_delta(5, 0, 0))
        .with_choice(Choice::new("bait", "Toss a bottle to lure the nest away and bolt", "finale_bridge"))
        .with_choice(Choice::new("torch", "Set the ceiling on fire and run", "finale_bridge").with_delta(-6, 3, 0).sets_flag("manipulator")),

        Scene::new(
            "route_purifiers",
            "Red armbands and welded steel. A loudspeaker cracks: 'Declare yourself.'",
        )
        .with_choice(Choice::new("volunteer", "Volunteer intel on Bloom nests", "finale_bridge").with_delta(-2, 0, 0).sets_flag("manipulator"))
        .with_choice(Choice::new("trade", "Trade meds for access", "finale_bridge"))
        .with_choice(Choice::new("double_cross", "Feed them Alex's address and walk away", "finale_bridge").with_delta(-10, 0, 0).sets_flag("manipulator"))
        .with_choice(Choice::new("withdraw", "Back away before they mark you", "finale_bridge")),

        Scene::new(
            "lone_walk",
            "Alone, the city is a map of risks you can carry in your head. No promises. No witnesses.",
        )
        .with_on_enter(vec![Effect::set_flag("loneWolf")])
        .with_choice(Choice::new("keep_moving", "Keep moving toward the water", "finale_bridge").sets_flag("loneWolf"))
        .with_choice(Choice::new("return", "Turn back one last time", "finale_bridge"))
        .with_choice(Choice::new("stash_more", "Make hidden stashes along the way", "finale_bridge").sets_flag("loneWolf"))
        .with_choice(Choice::new("follow_song", "Follow the song only you hear", "bloom_listen")),

        Scene::new(
            "paper_signed",
            "The paper is a promise with teeth. Alex signs with a shaking hand.",
        )
        .with_choice(Choice::new("cash_in", "Collect now and leave him to fate", "finale_bridge").with_delta(-6, 0, 0).sets_flag("manipulator"))
        .with_choice(Choice::new("change_heart", "Tear it up and actually help", "treat_wound").with_delta(5, 0, 0))
        .with_choice(Choice::new("leverage", "Use it to bend the block to your will", "finale_bridge").sets_flag("manipulator"))
        .with_choice(Choice::new("sell_purifiers", "Sell the debt to the Purifiers", "route_purifiers").with_delta(-8, 0, 0).sets_flag("manipulator")),

        Scene::new(
            "evac_plan",
            "You map rooftops and alleys. With luck you and Alex can reach the ferry by dusk.",
        )
        .with_choice(Choice::new("depart_now", "Depart now while the streets are thin", "finale_bridge"))
        .with_choice(Choice::new("wait", "Wait for night and try in the dark", "finale_bridge").with_delta(0, 0, 2))
        .with_choice(Choice::new("abandon", "Leave him sleeping and travel faster", "finale_bridge").with_delta(-7, 0, 0).sets_flag("loneWolf"))
        .with_choice(Choice::new("call_help", "Radio anyone who still answers", "finale_bridge")),

        Scene::new(
            "room_inventory",
            "You take stock: half a tin of beans, a flashlight with a weak beam, a radio that only hisses. Through the wall, something hums.",
        )
        .with_choice(Choice::new("go_lobby", "Head down to the lobby", "lobby_crossroads"))
        .with_choice(Choice::new("fire_escape", "Climb out to the fire escape", "alley_drop").with_delta(0, 0, 2))
        .with_choice(Choice::new("tune_radio", "Tune the radio's static against the hum", "bloom_listen"))
        .with_choice(Choice::new("pack_light", "Pack light and leave the block behind", "lone_walk").sets_flag("loneWolf"))
        // Fifth option is authored but never shown.
        .with_choice(Choice::new("wait_rescue", "Barricade in and wait for a rescue that never comes", "finale_bridge").with_delta(0, 0, -2)),

        Scene::new(
            "care_night",
            "The fever breaks a little before dawn. Alex sleeps with your jacket over him, breathing slow and wet.",
        )
        .with_choice(Choice::new("plan_at_dawn", "Plan the way out while he rests", "evac_plan").with_delta(2, 0, 0))
        .with_choice(Choice::new("fetch_meds", "Slip out for stronger medicine", "pharmacy_run"))
        .with_choice(Choice::new("watch_veins", "Watch the veins under the lamp", "bloom_test").with_delta(0, 2, 0))
        .with_choice(Choice::new("slip_away", "Leave before he wakes", "lone_walk").with_delta(-5, 0, 0)),

        Scene::new(
            "extract_tribute",
            "Alex, bound and shaking, lists everything he owns. Each item is a coin you could spend.",
        )
        .with_choice(Choice::new("write_it_down", "Write it all down and make him sign", "paper_signed").sets_flag("manipulator"))
        .with_choice(Choice::new("sell_list", "Take the list to the Purifiers", "route_purifiers").with_delta(-4, 0, 0).sets_flag("manipulator"))
        .with_choice(Choice::new("cut_ropes", "Cut the ropes and treat the bite", "treat_wound").with_delta(3, 0, 0))
        .with_choice(Choice::new("take_and_go", "Take his keys and go", "find_cache").with_delta(-2, 0, 0)),

        Scene::new(
            "finale_bridge",
            "Hours later, your choices have a shape. The city listens. The Bloom hums its one long note.",
        )
        .with_choice(Choice::new("accept_fate", "Face what you've become", TERMINAL_SCENE_ID))
        .with_choice(Choice::new("one_more_good", "Do one more good deed on the way", TERMINAL_SCENE_ID).with_delta(2, 0, 0))
        .with_choice(Choice::new("one_more_terrible", "Do one more terrible thing to feel in control", TERMINAL_SCENE_ID).with_delta(-4, 0, 0))
        .with_choice(
            Choice::new("listen_song", "Listen again to the song under everything", TERMINAL_SCENE_ID)
                .with_after(vec![Effect::set_flag_if("bloomChoice", "bloomInsight")]),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{MAX_VISIBLE_CHOICES, PlayerState};
    use std::collections::HashSet;

    #[test]
    fn test_builtin_story_validates() {
        let story = consequence();
        assert!(story.validate().is_ok(), "{:?}", story.validate());
        assert_eq!(story.get_scene_count(), 24);
        assert_eq!(story.endings.len(), 6);
    }

    #[test]
    fn test_only_room_inventory_is_over_provisioned() {
        let story = consequence();
        let flagged: Vec<&str> = story.over_provisioned_scenes().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(flagged, vec!["room_inventory"]);

        let room = story.get_scene("room_inventory").unwrap();
        assert_eq!(room.choices.len(), MAX_VISIBLE_CHOICES + 1);
        assert!(room.visible_choices().iter().all(|c| c.id != "wait_rescue"));
    }

    #[test]
    fn test_every_scene_is_reachable_from_intro() {
        let story = consequence();
        let mut seen = HashSet::new();
        let mut frontier = vec![story.starting_scene_id.clone()];

        while let Some(id) = frontier.pop() {
            if !seen.insert(id.clone()) {
                continue;
            }
            if let Some(scene) = story.get_scene(&id) {
                for choice in scene.visible_choices() {
                    frontier.push(choice.target_scene_id.clone());
                }
            }
        }

        for scene in &story.scenes {
            assert!(seen.contains(&scene.id), "scene '{}' is unreachable", scene.id);
        }
        assert!(seen.contains(TERMINAL_SCENE_ID));
    }

    #[test]
    fn test_ending_order() {
        let ids: Vec<String> = consequence().endings.into_iter().map(|e| e.id).collect();
        assert_eq!(
            ids,
            vec![
                "ending_bloomborne",
                "ending_tyrant",
                "ending_manipulator",
                "ending_ghost",
                "ending_saint",
                "ending_lone_survivor",
            ]
        );
    }

    #[test]
    fn test_bloom_flag_alone_wins_regardless_of_stats() {
        let compiled = consequence().compile().unwrap();
        let mut state = PlayerState::new("intro");
        state.set_flag("bloomChoice");

        for morality in [-100, -45, 0, 45, 100] {
            for trauma in [0, 79, 80, 100] {
                state.stats.morality = morality;
                state.stats.trauma = trauma;
                assert_eq!(
                    compiled.endings().pick_ending(&state).id,
                    "ending_bloomborne",
                    "morality {} trauma {}",
                    morality,
                    trauma
                );
            }
        }
    }

    #[test]
    fn test_blank_state_falls_back_to_lone_survivor() {
        let compiled = consequence().compile().unwrap();
        let state = PlayerState::new("intro");

        assert_eq!(compiled.endings().pick_ending(&state).id, "ending_lone_survivor");
    }

    #[test]
    fn test_tyrant_listed_before_manipulator() {
        let compiled = consequence().compile().unwrap();
        let mut state = PlayerState::new("intro");
        state.stats.morality = -60;
        state.set_flag("manipulator");

        assert_eq!(compiled.endings().pick_ending(&state).id, "ending_tyrant");
    }
}

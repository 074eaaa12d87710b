//! Literal hand texts shared by the unit tests

/// Three-handed hand decided by an uncalled river bet; no raises, so the
/// balances sum to zero
pub const RIVER_BET_HAND: &str = "Poker Hand #tour_555001: Tournament #4242, Sunday Grind (9+1+0) Hold'em No Limit - Level1 (100/200) - 2024/05/01 20:15:42
Table '' 3-max Seat #3 is the button
Seat 1: Alice (4,000 in chips)
Seat 2: Bob (6,000 in chips)
Seat 3: Hero (5,000 in chips)
Alice: posts the ante 20
Bob: posts the ante 20
Hero: posts the ante 20
Alice: posts small blind 100
Bob: posts big blind 200
*** HOLE CARDS ***
Dealt to Hero [Qs Qd]
Hero: calls 200
Alice: folds
Bob: checks
*** FLOP *** [Ah Kd 7c]
Bob: bets 400
Hero: calls 400
*** TURN *** [Ah Kd 7c] [2s]
Bob: checks
Hero: checks
*** RIVER *** [Ah Kd 7c 2s] [9h]
Bob: bets 1,000
Hero: folds
Uncalled bet (1,000) returned to Bob
*** SHOWDOWN ***
Bob collected 1,360 from pot
*** SUMMARY ***
Total pot 1,360 | Rake 0
Board [Ah Kd 7c 2s 9h]
Seat 1: Alice (small blind) folded before Flop
Seat 2: Bob (big blind) won (1,360)
Seat 3: Hero (button) folded on the River";

/// Ante all-in for Alice, preflop all-in for Carol, board run out
pub const ALL_IN_HAND: &str = "Poker Hand #tour_555002: Tournament #4242, Sunday Grind (9+1+0) Hold'em No Limit - Level1 (100/200) - 2024/05/01 20:17:03
Table '' 3-max Seat #1 is the button
Seat 1: Alice (20 in chips)
Seat 2: Bob (3,000 in chips)
Seat 3: Carol (1,500 in chips)
Bob: posts the ante 20
Carol: posts the ante 20
Alice: posts the ante 20
Bob: posts small blind 100
Carol: posts big blind 200
*** HOLE CARDS ***
Bob: raises 1,280 to 1,480
Carol: calls 1,280 and is all-in
*** FLOP *** [Ah Kd 7c]
*** TURN *** [Ah Kd 7c] [2s]
*** RIVER *** [Ah Kd 7c 2s] [9h]
*** SHOWDOWN ***
Bob: shows [Qc Qh]
Carol: shows [As Ad]
Carol collected 3,020 from pot
*** SUMMARY ***
Total pot 3,020 | Rake 0
Board [Ah Kd 7c 2s 9h]
Seat 2: Bob (small blind) showed [Qc Qh] and lost
Seat 3: Carol (big blind) showed [As Ad] and won (3,020)";

/// Heads-up hand where one name ends the other
pub const SUFFIX_NAME_HAND: &str = "Poker Hand #tour_555003: Tournament #4242, Sunday Grind (9+1+0) Hold'em No Limit - Level1 (100/200) - 2024/05/01 20:19:40
Table '' 2-max Seat #1 is the button
Seat 1: JimBob (1,000 in chips)
Seat 2: Bob (8,000 in chips)
JimBob: posts the ante 20
Bob: posts the ante 20
JimBob: posts small blind 100
Bob: posts big blind 200
*** HOLE CARDS ***
JimBob: raises 780 to 980 and is all-in
Bob: folds
Uncalled bet (780) returned to JimBob
*** SHOWDOWN ***
JimBob collected 440 from pot
*** SUMMARY ***
Total pot 440 | Rake 0
Seat 1: JimBob (small blind) won (440)
Seat 2: Bob (big blind) folded before Flop";
